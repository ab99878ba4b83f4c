//! Token-dispatch state machine shared by parsing and completion.
//!
//! The same walk over argv serves two consumers. In parse mode every recognized
//! token is delivered to the observer. In completion mode the walk is identical
//! until the cursor reaches the last token, which is then expanded into
//! candidates instead of being delivered.

use crate::completion::{CompletionSink, Completions};
use crate::error::ParseError;
use crate::observer::{Arity, Halt, Logger, ParseObserver, Step};

/// Lexical shape of one argv token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    /// `--name` or `--name=value`, without the leading dashes.
    Long(&'a str),
    /// A bare `--`.
    Escape,
    /// `-abc`, without the leading dash.
    Short(&'a str),
    /// A bare `-`.
    StrayDash,
    Positional(&'a str),
}

impl<'a> Token<'a> {
    fn classify(arg: &'a str) -> Self {
        match arg {
            "--" => Self::Escape,
            "-" => Self::StrayDash,
            _ => {
                if let Some(body) = arg.strip_prefix("--") {
                    Self::Long(body)
                } else if let Some(body) = arg.strip_prefix('-') {
                    Self::Short(body)
                } else {
                    Self::Positional(arg)
                }
            }
        }
    }
}

struct Parser<'a, S> {
    args: &'a [S],
    current: usize,
    completions: Option<Completions>,
}

impl<'a, S: AsRef<str>> Parser<'a, S> {
    fn new(args: &'a [S], completing: bool) -> Self {
        Self {
            args,
            current: 0,
            completions: completing.then(Completions::new),
        }
    }

    fn has_next(&self) -> bool {
        self.current < self.args.len()
    }

    fn next_arg(&mut self) -> Option<&'a str> {
        let args = self.args;
        let arg = args.get(self.current)?.as_ref();
        self.current += 1;
        Some(arg)
    }

    /// The candidate collector, but only once the cursor has consumed the last token.
    fn completing(&mut self) -> Option<&mut Completions> {
        if self.has_next() {
            return None;
        }
        self.completions.as_mut()
    }

    fn run<O: ParseObserver + ?Sized>(&mut self, observer: &mut O) -> Step {
        while let Some(arg) = self.next_arg() {
            let token = Token::classify(arg);
            tracing::trace!(?token, "classified argument");
            match token {
                Token::Long(body) => self.long_flag(body, observer)?,
                Token::Escape => {
                    if let Some(sink) = self.completing() {
                        complete_long_flag(sink, "", observer);
                    } else {
                        self.escape(observer)?;
                    }
                }
                Token::Short(cluster) => self.short_cluster(cluster, observer)?,
                Token::StrayDash => {
                    if let Some(sink) = self.completing() {
                        complete_any_flag(sink, observer);
                    } else {
                        return fail(observer, ParseError::StrayDash);
                    }
                }
                Token::Positional(arg) => {
                    if let Some(sink) = self.completing() {
                        complete_positional(sink, arg, observer, true);
                    } else {
                        observer.notify_arg(arg)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Everything after `--` is positional, whatever it looks like.
    fn escape<O: ParseObserver + ?Sized>(&mut self, observer: &mut O) -> Step {
        while let Some(arg) = self.next_arg() {
            match self.completing() {
                Some(sink) => complete_positional(sink, arg, observer, false),
                None => observer.notify_arg(arg)?,
            }
        }
        Ok(())
    }

    fn long_flag<O: ParseObserver + ?Sized>(&mut self, body: &'a str, observer: &mut O) -> Step {
        if let Some((name, value)) = body.split_once('=') {
            return match observer.long_flag(name) {
                None => fail(observer, ParseError::UnrecognizedFlag(format!("--{name}"))),
                Some(Arity::NoValue) => {
                    fail(observer, ParseError::FlagTakesNoArgument(format!("--{name}")))
                }
                Some(Arity::TakesValue) => {
                    self.long_value(name, value, format!("--{name}="), observer)
                }
            };
        }

        let name = body;
        if let Some(sink) = self.completing() {
            complete_long_flag(sink, name, observer);
            return Ok(());
        }
        match observer.long_flag(name) {
            None => fail(observer, ParseError::UnrecognizedFlag(format!("--{name}"))),
            Some(Arity::NoValue) => observer.notify_long_flag(name),
            Some(Arity::TakesValue) => match self.next_arg() {
                Some(value) => self.long_value(name, value, String::new(), observer),
                None => fail(observer, ParseError::MissingFlagValue(format!("--{name}"))),
            },
        }
    }

    fn long_value<O: ParseObserver + ?Sized>(
        &mut self,
        name: &str,
        value: &str,
        typed: String,
        observer: &mut O,
    ) -> Step {
        match self.completing() {
            Some(sink) => {
                sink.set_prefix(typed);
                observer.complete_long_flag_value(name, value, sink);
                Ok(())
            }
            None => observer.notify_long_flag_value(name, value),
        }
    }

    fn short_cluster<O: ParseObserver + ?Sized>(
        &mut self,
        cluster: &'a str,
        observer: &mut O,
    ) -> Step {
        for (i, name) in cluster.char_indices() {
            match observer.short_flag(name) {
                None => return fail(observer, ParseError::UnrecognizedFlag(format!("-{name}"))),
                Some(Arity::NoValue) => observer.notify_short_flag(name)?,
                Some(Arity::TakesValue) => {
                    // A value-taking flag always ends the cluster.
                    let split = i + name.len_utf8();
                    let rest = &cluster[split..];
                    if !rest.is_empty() {
                        let typed = format!("-{}", &cluster[..split]);
                        return self.short_value(name, rest, typed, observer);
                    }
                    if let Some(value) = self.next_arg() {
                        return self.short_value(name, value, String::new(), observer);
                    }
                    if let Some(sink) = self.completing() {
                        sink.set_prefix("");
                        sink.final_completion(&format!("-{cluster}"));
                        return Ok(());
                    }
                    return fail(observer, ParseError::MissingFlagValue(format!("-{name}")));
                }
            }
        }

        if let Some(sink) = self.completing() {
            complete_short_flag(sink, &format!("-{cluster}"), observer);
        }
        Ok(())
    }

    fn short_value<O: ParseObserver + ?Sized>(
        &mut self,
        name: char,
        value: &str,
        typed: String,
        observer: &mut O,
    ) -> Step {
        match self.completing() {
            Some(sink) => {
                sink.set_prefix(typed);
                observer.complete_short_flag_value(name, value, sink);
                Ok(())
            }
            None => observer.notify_short_flag_value(name, value),
        }
    }
}

fn fail<O: Logger + ?Sized>(observer: &mut O, err: ParseError) -> Step {
    observer.error(err);
    Err(Halt)
}

fn complete_long_flag<O: ParseObserver + ?Sized>(
    sink: &mut Completions,
    prefix: &str,
    observer: &O,
) {
    sink.set_prefix("--");
    // A bare `--` is itself a valid token while positionals are accepted.
    if prefix.is_empty() && observer.accepting_args() {
        sink.final_completion("");
    }
    observer.complete_long_flag(prefix, sink);
}

fn complete_short_flag<O: ParseObserver + ?Sized>(
    sink: &mut Completions,
    typed: &str,
    observer: &O,
) {
    sink.set_prefix(typed);
    if typed.len() > 1 {
        sink.final_completion("");
    }
    observer.complete_short_flag(sink);
}

fn complete_any_flag<O: ParseObserver + ?Sized>(sink: &mut Completions, observer: &O) {
    complete_short_flag(sink, "-", observer);
    complete_long_flag(sink, "", observer);
}

fn complete_positional<O: ParseObserver + ?Sized>(
    sink: &mut Completions,
    arg: &str,
    observer: &O,
    flags_allowed: bool,
) {
    sink.set_prefix("");
    if observer.accepting_args() {
        observer.complete_arg(arg, sink);
    } else if flags_allowed && arg.is_empty() {
        complete_any_flag(sink, observer);
    }
}

/// Walk `args` in parse mode.
///
/// Returns `Err(Halt)` when a structural error (or a fatal handler) stopped the
/// scan. Soft errors are only visible through the observer's error count.
pub fn scan<S, O>(args: &[S], observer: &mut O) -> Step
where
    S: AsRef<str>,
    O: ParseObserver + ?Sized,
{
    Parser::new(args, false).run(observer)
}

/// Parse `args`, returning whether the scan finished without recording any error.
pub fn parse<S, O>(args: &[S], observer: &mut O) -> bool
where
    S: AsRef<str>,
    O: ParseObserver + ?Sized,
{
    scan(args, observer).is_ok() && observer.num_errors() == 0
}

/// Walk `args` in completion mode and collect candidates for the last token.
pub fn complete<S, O>(args: &[S], observer: &mut O) -> Completions
where
    S: AsRef<str>,
    O: ParseObserver + ?Sized,
{
    let mut parser = Parser::new(args, true);
    if parser.run(observer).is_err() {
        tracing::debug!("completion pass halted before the last token");
    }
    let completions = parser.completions.unwrap_or_default();
    tracing::debug!(
        candidates = completions.candidates().len(),
        partial = completions.is_partial(),
        "completion pass finished"
    );
    completions
}
