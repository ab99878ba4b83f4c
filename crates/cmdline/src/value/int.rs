use std::marker::PhantomData;

use super::ValueParser;
use crate::error::ValueError;

/// Signed integer widths accepted by [`Int`].
pub trait IntWidth: TryFrom<i128> + Copy + 'static {
    const NAME: &'static str;
}

macro_rules! int_width {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(impl IntWidth for $ty {
            const NAME: &'static str = $name;
        })*
    };
}

int_width! {
    i8 => "int8",
    i16 => "int16",
    i32 => "int32",
    i64 => "int64",
}

/// Bounded-width signed integer.
///
/// Accepts an optional sign followed by a decimal literal, a `0x`/`0o`/`0b`
/// prefixed literal, or a legacy octal literal with a leading `0`. Single
/// underscores may separate digits.
pub struct Int<T> {
    _width: PhantomData<T>,
}

impl<T: IntWidth> Int<T> {
    pub fn new() -> Self {
        Self {
            _width: PhantomData,
        }
    }
}

impl<T: IntWidth> Default for Int<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IntWidth> ValueParser for Int<T> {
    type Value = T;

    fn parse(&self, text: &str) -> Result<T, ValueError> {
        parse_literal(text)
            .and_then(|n| T::try_from(n).ok())
            .ok_or_else(|| ValueError::InvalidInteger {
                text: text.to_string(),
                type_name: T::NAME.to_string(),
            })
    }

    fn type_name(&self) -> String {
        T::NAME.to_string()
    }
}

fn parse_literal(text: &str) -> Option<i128> {
    let (negative, body) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    };

    let (radix, digits, prefixed) = split_radix(body);
    let magnitude = parse_digits(digits, radix, prefixed)?;
    Some(if negative { -magnitude } else { magnitude })
}

fn split_radix(body: &str) -> (u32, &str, bool) {
    let prefix = body.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("0x") => (16, &body[2..], true),
        Some("0o") => (8, &body[2..], true),
        Some("0b") => (2, &body[2..], true),
        _ if body.len() > 1 && body.starts_with('0') => (8, &body[1..], true),
        _ => (10, body, false),
    }
}

fn parse_digits(digits: &str, radix: u32, prefixed: bool) -> Option<i128> {
    // `0x_ff` is fine, `_ff` is not.
    let digits = match digits.strip_prefix('_') {
        Some(rest) if prefixed => rest,
        _ => digits,
    };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }

    let mut value: i128 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix)?;
        value = value
            .checked_mul(i128::from(radix))?
            .checked_add(i128::from(digit))?;
    }
    Some(value)
}
