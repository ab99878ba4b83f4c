//! Command-line argument parsing with integrated shell completion.
//!
//! One grammar drives two consumers: [`parse`] delivers long flags, short flag
//! clusters and positional arguments to a [`ParseObserver`], while [`complete`]
//! walks the same tokens and enumerates what could follow the last one.
//! [`App`] is a ready-made observer holding typed flag and argument definitions.

mod app;
mod bash;
mod completion;
mod error;
mod observer;
mod parser;
pub mod value;

pub use app::{App, AppBuilder, Argument, COMPLETION_SCRIPT, Flag, GENERATE_COMPLETION, Outcome};
pub use bash::completion_script;
pub use completion::{CompletionSink, Completions, clip_point};
pub use error::{ConfigError, ParseError, ValueError};
pub use observer::{Arity, Halt, Logger, ParseObserver, Step};
pub use parser::{complete, parse, scan};
