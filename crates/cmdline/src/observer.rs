//! The boundary between the token scanner and whatever owns the flag definitions.

use crate::completion::CompletionSink;
use crate::error::ParseError;

/// Marker returned when the scan must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt;

/// Status of one scan step: `Err(Halt)` aborts the remaining tokens.
pub type Step = Result<(), Halt>;

/// Whether a flag consumes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    NoValue,
    TakesValue,
}

/// Single sink for user-visible errors.
pub trait Logger {
    fn error(&mut self, err: ParseError);
    fn num_errors(&self) -> usize;
}

/// Queries and events the parser sends while walking argv.
///
/// Lookups return `None` for unknown flags. Notifications return a [`Step`] so an
/// observer can stop the scan (for example after a fatal conversion error).
/// Completion callbacks push candidates into the given sink and never fail.
pub trait ParseObserver: Logger {
    fn long_flag(&self, name: &str) -> Option<Arity>;
    fn short_flag(&self, name: char) -> Option<Arity>;

    fn notify_long_flag(&mut self, name: &str) -> Step;
    fn notify_long_flag_value(&mut self, name: &str, value: &str) -> Step;
    fn notify_short_flag(&mut self, name: char) -> Step;
    fn notify_short_flag_value(&mut self, name: char, value: &str) -> Step;
    fn notify_arg(&mut self, value: &str) -> Step;

    fn complete_long_flag(&self, prefix: &str, sink: &mut dyn CompletionSink);
    fn complete_long_flag_value(&self, name: &str, value: &str, sink: &mut dyn CompletionSink);
    fn complete_short_flag(&self, sink: &mut dyn CompletionSink);
    fn complete_short_flag_value(&self, name: char, value: &str, sink: &mut dyn CompletionSink);
    fn complete_arg(&self, prefix: &str, sink: &mut dyn CompletionSink);

    /// Whether another positional argument would find a slot.
    fn accepting_args(&self) -> bool;
}
