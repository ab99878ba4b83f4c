//! Typed value handlers.
//!
//! A [`ValueParser`] knows how to turn text into a value, what the value is
//! called in help output, and which completions it can offer. Pairing a parser
//! with a [`ValueSink`] yields a [`Handler`], the object-safe [`ValueHandler`]
//! that the registry dispatches into.

mod int;
mod path;
mod string;

pub use int::{Int, IntWidth};
pub use path::FilePath;
pub use string::{Enum, Str};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::completion::CompletionSink;
use crate::error::{ParseError, ValueError};
use crate::observer::{Halt, Logger, Step};

/// Conversion from text into a typed value.
pub trait ValueParser {
    type Value;

    fn parse(&self, text: &str) -> Result<Self::Value, ValueError>;

    /// Name used in help output, e.g. `int32` or `{arm,x64}`.
    fn type_name(&self) -> String;

    /// Offer candidates for the partially typed `text`. Offers nothing by default.
    fn complete(&self, _text: &str, _sink: &mut dyn CompletionSink) {}

    /// Deliver every parsed value to `f`.
    fn call<F>(self, f: F) -> Handler<Self>
    where
        Self: Sized,
        F: FnMut(Self::Value) + 'static,
    {
        Handler::new(self, f)
    }

    /// Deliver every parsed value to `slot`.
    fn store(self, slot: &Slot<Self::Value>) -> Handler<Self>
    where
        Self: Sized,
        Self::Value: 'static,
    {
        Handler::new(self, slot.clone())
    }
}

/// What the registry holds for every value-taking flag and positional slot.
pub trait ValueHandler {
    /// Parse `text` and deliver the value. Conversion errors go to `log`.
    fn notify(&mut self, text: &str, log: &mut dyn Logger) -> Step;
    fn complete(&self, text: &str, sink: &mut dyn CompletionSink);
    fn type_name(&self) -> String;
}

/// Destination of parsed values.
pub trait ValueSink<T> {
    fn accept(&mut self, value: T);
}

impl<T, F> ValueSink<T> for F
where
    F: FnMut(T),
{
    fn accept(&mut self, value: T) {
        self(value)
    }
}

/// Shared cell collecting every value delivered during a pass.
pub struct Slot<T>(Rc<RefCell<Vec<T>>>);

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    /// The most recently delivered value.
    pub fn get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.0.borrow().last().cloned()
    }

    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.0.borrow()).finish()
    }
}

impl<T> ValueSink<T> for Slot<T> {
    fn accept(&mut self, value: T) {
        self.0.borrow_mut().push(value);
    }
}

/// A parser bound to a sink.
pub struct Handler<P: ValueParser> {
    parser: P,
    sink: Box<dyn ValueSink<P::Value>>,
    fatal: bool,
}

impl<P: ValueParser> Handler<P> {
    pub fn new(parser: P, sink: impl ValueSink<P::Value> + 'static) -> Self {
        Self {
            parser,
            sink: Box::new(sink),
            fatal: false,
        }
    }

    /// Make conversion errors halt the scan instead of only being recorded.
    pub fn fatal(mut self) -> Self {
        self.fatal = true;
        self
    }
}

impl<P: ValueParser> ValueHandler for Handler<P> {
    fn notify(&mut self, text: &str, log: &mut dyn Logger) -> Step {
        match self.parser.parse(text) {
            Ok(value) => {
                self.sink.accept(value);
                Ok(())
            }
            Err(err) => {
                log.error(ParseError::Value(err));
                if self.fatal { Err(Halt) } else { Ok(()) }
            }
        }
    }

    fn complete(&self, text: &str, sink: &mut dyn CompletionSink) {
        self.parser.complete(text, sink);
    }

    fn type_name(&self) -> String {
        self.parser.type_name()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ErrorLog;
    use super::*;

    #[test]
    fn store_keeps_every_value_in_order() {
        let slot = Slot::new();
        let mut handler = Int::<i32>::new().store(&slot);
        let mut log = ErrorLog::default();
        assert_eq!(handler.notify("1", &mut log), Ok(()));
        assert_eq!(handler.notify("0x10", &mut log), Ok(()));
        assert_eq!(slot.values(), [1, 16]);
        assert_eq!(slot.get(), Some(16));
        assert!(log.0.is_empty());
    }

    #[test]
    fn call_invokes_closure() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut handler = Str.call(move |v| sink.borrow_mut().push(v));
        let mut log = ErrorLog::default();
        handler.notify("abc", &mut log).unwrap();
        assert_eq!(*seen.borrow(), ["abc"]);
    }

    #[test]
    fn conversion_errors_are_recorded_and_scan_continues() {
        let slot = Slot::new();
        let mut handler = Int::<i32>::new().store(&slot);
        let mut log = ErrorLog::default();
        assert_eq!(handler.notify("12x", &mut log), Ok(()));
        assert!(slot.is_empty());
        assert_eq!(log.0.len(), 1);
        assert_eq!(log.0[0].to_string(), "\"12x\" cannot be converted into an int32");
    }

    #[test]
    fn fatal_handler_halts_on_error() {
        let slot = Slot::new();
        let mut handler = Int::<i8>::new().store(&slot).fatal();
        let mut log = ErrorLog::default();
        assert_eq!(handler.notify("300", &mut log), Err(Halt));
        assert_eq!(log.num_errors(), 1);
        assert_eq!(handler.notify("3", &mut log), Ok(()));
        assert_eq!(slot.get(), Some(3));
    }

    #[test]
    fn handler_reports_parser_type_name() {
        let handler = Enum::new(["a", "b"]).call(|_| {});
        assert_eq!(handler.type_name(), "{a,b}");
    }
}
