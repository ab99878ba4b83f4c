//! Flag and argument registry.
//!
//! [`App`] owns the flag definitions and positional slots of one program and
//! implements [`ParseObserver`], so the parser can query it and deliver events.

mod help;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::bash::completion_script;
use crate::completion::{CompletionSink, Completions, clip_point};
use crate::error::{ConfigError, ParseError};
use crate::observer::{Arity, Halt, Logger, ParseObserver, Step};
use crate::parser;
use crate::value::ValueHandler;

/// First token that switches [`App::run`] into completion mode.
///
/// The second token carries the shell's word-break characters, the rest are the
/// words typed so far.
pub const GENERATE_COMPLETION: &str = "--generate-bash-completion";

/// First token that makes [`App::run`] return the bash integration script.
pub const COMPLETION_SCRIPT: &str = "--bash-completion-script";

enum Action {
    Call(Box<dyn FnMut()>),
    Value(Box<dyn ValueHandler>),
}

/// A flag definition.
///
/// Built from its action, a closure for boolean flags or a value handler for
/// flags that take a value, then named with [`Flag::long`] and/or [`Flag::short`].
pub struct Flag {
    long: Option<String>,
    short: Option<char>,
    action: Action,
    default: Option<String>,
    min: usize,
    max: Option<usize>,
    uses: usize,
}

impl Flag {
    fn with_action(action: Action) -> Self {
        Self {
            long: None,
            short: None,
            action,
            default: None,
            min: 0,
            max: None,
            uses: 0,
        }
    }

    /// A boolean flag running `f` every time it is used.
    pub fn call(f: impl FnMut() + 'static) -> Self {
        Self::with_action(Action::Call(Box::new(f)))
    }

    /// A flag taking a value, delivered through `handler`.
    pub fn value(handler: impl ValueHandler + 'static) -> Self {
        Self::with_action(Action::Value(Box::new(handler)))
    }

    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long = Some(name.into());
        self
    }

    pub fn short(mut self, name: char) -> Self {
        self.short = Some(name);
        self
    }

    /// Text fed to the value handler when the flag is never used.
    pub fn default_value(mut self, text: impl Into<String>) -> Self {
        self.default = Some(text.into());
        self
    }

    /// The flag must be used at least once.
    pub fn required(mut self) -> Self {
        self.min = self.min.max(1);
        self
    }

    pub fn min_uses(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    pub fn max_uses(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Display name, e.g. `-b/--bar`, `--arch` or `-f`.
    pub fn name(&self) -> String {
        match (self.short, &self.long) {
            (Some(short), Some(long)) => format!("-{short}/--{long}"),
            (None, Some(long)) => format!("--{long}"),
            (Some(short), None) => format!("-{short}"),
            (None, None) => String::new(),
        }
    }

    fn arity(&self) -> Arity {
        match self.action {
            Action::Call(_) => Arity::NoValue,
            Action::Value(_) => Arity::TakesValue,
        }
    }

    fn handler(&self) -> Option<&dyn ValueHandler> {
        match &self.action {
            Action::Value(handler) => Some(&**handler),
            Action::Call(_) => None,
        }
    }

    fn can_accept_more(&self) -> bool {
        self.max.is_none_or(|max| self.uses < max)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.long.is_none() && self.short.is_none() {
            return Err(ConfigError::Nameless);
        }
        if let Some(long) = &self.long
            && (long.is_empty() || long.starts_with('-') || long.contains('='))
        {
            return Err(ConfigError::InvalidName(long.clone()));
        }
        if self.short == Some('-') {
            return Err(ConfigError::InvalidName("-".to_string()));
        }
        if self.default.is_some() && self.handler().is_none() {
            return Err(ConfigError::DefaultWithoutValue(self.name()));
        }
        if let Some(max) = self.max
            && self.min > max
        {
            return Err(ConfigError::InvalidBounds {
                flag: self.name(),
                min: self.min,
                max,
            });
        }
        Ok(())
    }
}

/// A named positional slot.
pub struct Argument {
    name: String,
    handler: Box<dyn ValueHandler>,
}

impl Argument {
    pub fn new(name: impl Into<String>, handler: impl ValueHandler + 'static) -> Self {
        Self {
            name: name.into(),
            handler: Box::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Result of [`App::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every token was accepted and every requirement met.
    Parsed,
    /// The errors recorded during the pass, in order.
    Failed(Vec<ParseError>),
    /// Lines to print for the shell, already clipped.
    Complete(Vec<String>),
    /// The bash integration script.
    Script(String),
}

#[derive(Debug, Default)]
struct ErrorLog {
    errors: Vec<ParseError>,
}

impl Logger for ErrorLog {
    fn error(&mut self, err: ParseError) {
        tracing::debug!(error = %err, structural = err.is_structural(), "recorded parse error");
        self.errors.push(err);
    }

    fn num_errors(&self) -> usize {
        self.errors.len()
    }
}

pub struct AppBuilder {
    name: String,
    flags: Vec<Flag>,
    required_args: Vec<Argument>,
    excess: Option<Argument>,
}

impl AppBuilder {
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn flags(mut self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.flags.extend(flags);
        self
    }

    pub fn required_arg(mut self, arg: Argument) -> Self {
        self.required_args.push(arg);
        self
    }

    pub fn required_args(mut self, args: impl IntoIterator<Item = Argument>) -> Self {
        self.required_args.extend(args);
        self
    }

    /// Slot absorbing every positional beyond the required ones.
    pub fn excess_args(mut self, arg: Argument) -> Self {
        self.excess = Some(arg);
        self
    }

    pub fn build(self) -> Result<App, ConfigError> {
        let mut long_index = IndexMap::new();
        let mut short_index = IndexMap::new();

        for (i, flag) in self.flags.iter().enumerate() {
            flag.validate()?;
            if let Some(long) = &flag.long {
                match long_index.entry(long.clone()) {
                    Entry::Occupied(_) => return Err(ConfigError::DuplicateLong(long.clone())),
                    Entry::Vacant(slot) => {
                        slot.insert(i);
                    }
                }
            }
            if let Some(short) = flag.short {
                match short_index.entry(short) {
                    Entry::Occupied(_) => return Err(ConfigError::DuplicateShort(short)),
                    Entry::Vacant(slot) => {
                        slot.insert(i);
                    }
                }
            }
        }

        Ok(App {
            name: self.name,
            flags: self.flags,
            long_index,
            short_index,
            required_args: self.required_args,
            excess: self.excess,
            current_arg: 0,
            log: ErrorLog::default(),
        })
    }
}

/// A program's command-line interface.
pub struct App {
    name: String,
    flags: Vec<Flag>,
    long_index: IndexMap<String, usize>,
    short_index: IndexMap<char, usize>,
    required_args: Vec<Argument>,
    excess: Option<Argument>,
    current_arg: usize,
    log: ErrorLog,
}

impl App {
    pub fn builder(name: impl Into<String>) -> AppBuilder {
        AppBuilder {
            name: name.into(),
            flags: Vec::new(),
            required_args: Vec::new(),
            excess: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Errors recorded by the last pass.
    pub fn errors(&self) -> &[ParseError] {
        &self.log.errors
    }

    fn reset(&mut self) {
        for flag in &mut self.flags {
            flag.uses = 0;
        }
        self.current_arg = 0;
        self.log.errors.clear();
    }

    /// Dispatch on the first token: completion request, script request, or a
    /// regular parse.
    pub fn run<S: AsRef<str>>(&mut self, args: &[S]) -> Outcome {
        match args.first().map(S::as_ref) {
            Some(GENERATE_COMPLETION) => {
                let wordbreaks = args.get(1).map_or("", S::as_ref);
                let words = args.get(2..).unwrap_or_default();
                Outcome::Complete(self.completion_lines(words, wordbreaks))
            }
            Some(COMPLETION_SCRIPT) => Outcome::Script(completion_script(&self.name)),
            _ if self.parse(args) => Outcome::Parsed,
            _ => Outcome::Failed(self.log.errors.clone()),
        }
    }

    /// Parse `args`, apply defaults and check requirements.
    ///
    /// Defaults and requirement checks are skipped when the scan halted on a
    /// structural error.
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S]) -> bool {
        self.reset();
        if parser::scan(args, self).is_ok() {
            self.post_parse();
        }
        self.log.num_errors() == 0
    }

    /// Candidates for the last of `args`.
    pub fn complete<S: AsRef<str>>(&mut self, args: &[S]) -> Completions {
        self.reset();
        parser::complete(args, self)
    }

    /// Completion output as the shell expects it, one line per candidate.
    pub fn completion_lines<S: AsRef<str>>(&mut self, words: &[S], wordbreaks: &str) -> Vec<String> {
        let word = words.last().map_or("", S::as_ref);
        let clip = clip_point(word, wordbreaks);
        self.complete(words).render(clip)
    }

    fn post_parse(&mut self) {
        let Self {
            flags,
            required_args,
            current_arg,
            log,
            ..
        } = self;

        for flag in flags.iter_mut() {
            if flag.uses == 0
                && let (Some(default), Action::Value(handler)) = (&flag.default, &mut flag.action)
            {
                tracing::trace!(default = %default, "applying default value");
                // A fatal handler rejecting its default halts like it would mid-scan.
                if handler.notify(default, log).is_err() {
                    return;
                }
            }
            if flag.min > flag.uses {
                log.error(ParseError::MissingRequiredFlag(flag.name()));
            }
        }
        for arg in required_args.iter().skip(*current_arg) {
            log.error(ParseError::MissingRequiredArgument(arg.name.clone()));
        }
    }

    fn notify_flag(&mut self, index: usize, value: Option<&str>) -> Step {
        let Self { flags, log, .. } = self;
        let flag = &mut flags[index];
        if let Some(max) = flag.max.filter(|&max| flag.uses >= max) {
            log.error(ParseError::FlagRepeated {
                flag: flag.name(),
                max,
            });
            return Err(Halt);
        }
        let takes_value = matches!(flag.action, Action::Value(_));
        if takes_value != value.is_some() {
            let name = flag.name();
            log.error(if takes_value {
                ParseError::MissingFlagValue(name)
            } else {
                ParseError::FlagTakesNoArgument(name)
            });
            return Err(Halt);
        }
        flag.uses += 1;
        match &mut flag.action {
            Action::Call(f) => {
                f();
                Ok(())
            }
            Action::Value(handler) => handler.notify(value.unwrap_or_default(), log),
        }
    }

    fn active_slot(&self) -> Option<&Argument> {
        self.required_args
            .get(self.current_arg)
            .or(self.excess.as_ref())
    }

    fn long_handler(&self, name: &str) -> Option<&dyn ValueHandler> {
        self.long_index
            .get(name)
            .and_then(|&i| self.flags[i].handler())
    }

    fn short_handler(&self, name: char) -> Option<&dyn ValueHandler> {
        self.short_index
            .get(&name)
            .and_then(|&i| self.flags[i].handler())
    }
}

impl Logger for App {
    fn error(&mut self, err: ParseError) {
        self.log.error(err);
    }

    fn num_errors(&self) -> usize {
        self.log.num_errors()
    }
}

impl ParseObserver for App {
    fn long_flag(&self, name: &str) -> Option<Arity> {
        self.long_index.get(name).map(|&i| self.flags[i].arity())
    }

    fn short_flag(&self, name: char) -> Option<Arity> {
        self.short_index.get(&name).map(|&i| self.flags[i].arity())
    }

    fn notify_long_flag(&mut self, name: &str) -> Step {
        match self.long_index.get(name) {
            Some(&i) => self.notify_flag(i, None),
            None => Ok(()),
        }
    }

    fn notify_long_flag_value(&mut self, name: &str, value: &str) -> Step {
        match self.long_index.get(name) {
            Some(&i) => self.notify_flag(i, Some(value)),
            None => Ok(()),
        }
    }

    fn notify_short_flag(&mut self, name: char) -> Step {
        match self.short_index.get(&name) {
            Some(&i) => self.notify_flag(i, None),
            None => Ok(()),
        }
    }

    fn notify_short_flag_value(&mut self, name: char, value: &str) -> Step {
        match self.short_index.get(&name) {
            Some(&i) => self.notify_flag(i, Some(value)),
            None => Ok(()),
        }
    }

    fn notify_arg(&mut self, value: &str) -> Step {
        let Self {
            required_args,
            excess,
            current_arg,
            log,
            ..
        } = self;

        let slot = match required_args.get_mut(*current_arg) {
            Some(arg) => {
                *current_arg += 1;
                arg
            }
            None => match excess {
                Some(arg) => arg,
                None => {
                    log.error(ParseError::ExtraArgument(value.to_string()));
                    return Err(Halt);
                }
            },
        };
        slot.handler.notify(value, log)
    }

    fn complete_long_flag(&self, prefix: &str, sink: &mut dyn CompletionSink) {
        for (long, &i) in &self.long_index {
            if self.flags[i].can_accept_more() && long.starts_with(prefix) {
                sink.final_completion(long);
            }
        }
    }

    fn complete_long_flag_value(&self, name: &str, value: &str, sink: &mut dyn CompletionSink) {
        if let Some(handler) = self.long_handler(name) {
            handler.complete(value, sink);
        }
    }

    fn complete_short_flag(&self, sink: &mut dyn CompletionSink) {
        for (short, &i) in &self.short_index {
            let flag = &self.flags[i];
            if !flag.can_accept_more() {
                continue;
            }
            let short = short.to_string();
            match flag.arity() {
                Arity::TakesValue => sink.final_completion(&short),
                Arity::NoValue => sink.partial_completion(&short),
            }
        }
    }

    fn complete_short_flag_value(&self, name: char, value: &str, sink: &mut dyn CompletionSink) {
        if let Some(handler) = self.short_handler(name) {
            handler.complete(value, sink);
        }
    }

    fn complete_arg(&self, prefix: &str, sink: &mut dyn CompletionSink) {
        if let Some(arg) = self.active_slot() {
            arg.handler.complete(prefix, sink);
        }
    }

    fn accepting_args(&self) -> bool {
        self.active_slot().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::ValueError;
    use crate::value::{Enum, Int, Slot, Str, ValueParser};

    const WORDBREAKS: &str = "\"'><=;|&(:";

    struct Fixture {
        foo: Rc<Cell<bool>>,
        bar: Slot<i32>,
        arch: Slot<String>,
        input: Slot<String>,
        rest: Slot<String>,
        app: App,
    }

    fn fixture() -> Fixture {
        let foo = Rc::new(Cell::new(false));
        let bar = Slot::new();
        let arch = Slot::new();
        let input = Slot::new();
        let rest = Slot::new();

        let set_foo = Rc::clone(&foo);
        let app = App::builder("prog")
            .flag(Flag::call(move || set_foo.set(true)).long("foo").short('f'))
            .flag(
                Flag::value(Int::<i32>::new().store(&bar))
                    .long("bar")
                    .short('b')
                    .required()
                    .max_uses(1),
            )
            .flag(
                Flag::value(Enum::new(["arm", "arm64", "ia32", "x64"]).store(&arch))
                    .long("arch")
                    .default_value("arm64"),
            )
            .required_arg(Argument::new("input", Str.store(&input)))
            .excess_args(Argument::new("rest", Str.store(&rest)))
            .build()
            .unwrap();

        Fixture {
            foo,
            bar,
            arch,
            input,
            rest,
            app,
        }
    }

    fn complete(app: &mut App, words: &[&str]) -> Outcome {
        let mut args = vec![GENERATE_COMPLETION, WORDBREAKS];
        args.extend_from_slice(words);
        app.run(&args)
    }

    #[test]
    fn parse_delivers_values_and_applies_defaults() {
        let mut f = fixture();
        let outcome = f.app.run(&["-f", "-b", "3", "in", "x", "--", "-y"]);
        assert_eq!(outcome, Outcome::Parsed);
        assert!(f.foo.get());
        assert_eq!(f.bar.get(), Some(3));
        assert_eq!(f.arch.values(), ["arm64"]);
        assert_eq!(f.input.values(), ["in"]);
        assert_eq!(f.rest.values(), ["x", "-y"]);
    }

    #[test]
    fn explicit_value_suppresses_default() {
        let mut f = fixture();
        assert_eq!(f.app.run(&["-b1", "--arch=x64", "in"]), Outcome::Parsed);
        assert_eq!(f.arch.values(), ["x64"]);
    }

    #[test]
    fn missing_requirements_are_reported_after_defaults() {
        let mut f = fixture();
        let outcome = f.app.run(&["-f"]);
        assert_eq!(
            outcome,
            Outcome::Failed(vec![
                ParseError::MissingRequiredFlag("-b/--bar".into()),
                ParseError::MissingRequiredArgument("input".into()),
            ])
        );
        assert_eq!(f.arch.get().as_deref(), Some("arm64"));
        let messages: Vec<String> = f.app.errors().iter().map(ToString::to_string).collect();
        assert_eq!(messages, ["-b/--bar is required", "argument \"input\" is required"]);
    }

    #[test]
    fn value_errors_do_not_stop_the_scan() {
        let mut f = fixture();
        let outcome = f.app.run(&["-b", "x", "in", "-f"]);
        assert_eq!(
            outcome,
            Outcome::Failed(vec![ParseError::Value(ValueError::InvalidInteger {
                text: "x".into(),
                type_name: "int32".into(),
            })])
        );
        assert!(f.foo.get());
        assert_eq!(f.input.values(), ["in"]);
    }

    #[test]
    fn independent_value_errors_are_all_collected() {
        let mut f = fixture();
        let outcome = f.app.run(&["-b", "q", "--arch", "sparc", "in", "-f"]);
        assert_eq!(
            outcome,
            Outcome::Failed(vec![
                ParseError::Value(ValueError::InvalidInteger {
                    text: "q".into(),
                    type_name: "int32".into(),
                }),
                ParseError::Value(ValueError::NotInSet {
                    text: "sparc".into(),
                    set: "{arm,arm64,ia32,x64}".into(),
                }),
            ])
        );
        assert!(f.foo.get());
    }

    #[test]
    fn fatal_handler_halts_scan_and_skips_post_pass() {
        let level = Slot::new();
        let rest = Slot::new();
        let mut app = App::builder("prog")
            .flag(Flag::value(Int::<i32>::new().store(&level).fatal()).short('a'))
            .flag(Flag::call(|| {}).short('r').required())
            .excess_args(Argument::new("rest", Str.store(&rest)))
            .build()
            .unwrap();
        assert_eq!(
            app.run(&["-a", "q", "x"]),
            Outcome::Failed(vec![ParseError::Value(ValueError::InvalidInteger {
                text: "q".into(),
                type_name: "int32".into(),
            })])
        );
        assert!(rest.is_empty());
    }

    #[test]
    fn fatal_default_stops_post_pass() {
        let level = Slot::new();
        let jobs = Slot::new();
        let mut app = App::builder("prog")
            .flag(
                Flag::value(Int::<i32>::new().store(&level).fatal())
                    .short('a')
                    .default_value("x"),
            )
            .flag(Flag::value(Int::<i32>::new().store(&jobs)).short('j').default_value("4"))
            .flag(Flag::call(|| {}).short('r').required())
            .build()
            .unwrap();
        assert_eq!(
            app.run::<&str>(&[]),
            Outcome::Failed(vec![ParseError::Value(ValueError::InvalidInteger {
                text: "x".into(),
                type_name: "int32".into(),
            })])
        );
        assert!(jobs.is_empty());
    }

    #[test]
    fn arity_mismatch_from_observer_caller_is_rejected() {
        let mut f = fixture();
        assert_eq!(f.app.notify_long_flag_value("foo", "x"), Err(Halt));
        assert_eq!(f.app.notify_short_flag('b'), Err(Halt));
        assert_eq!(
            f.app.errors(),
            [
                ParseError::FlagTakesNoArgument("-f/--foo".into()),
                ParseError::MissingFlagValue("-b/--bar".into()),
            ]
        );
        assert!(!f.foo.get());
        assert!(f.bar.is_empty());
    }

    #[test]
    fn flag_beyond_maximum_halts() {
        let mut f = fixture();
        let outcome = f.app.run(&["-b", "1", "--bar", "2"]);
        assert_eq!(
            outcome,
            Outcome::Failed(vec![ParseError::FlagRepeated {
                flag: "-b/--bar".into(),
                max: 1,
            }])
        );
        assert_eq!(f.bar.values(), [1]);
        // Halted: no defaults, no requirement check.
        assert!(f.arch.is_empty());
    }

    #[test]
    fn structural_error_skips_post_pass() {
        let mut f = fixture();
        assert_eq!(
            f.app.run(&["--nope"]),
            Outcome::Failed(vec![ParseError::UnrecognizedFlag("--nope".into())])
        );
    }

    #[test]
    fn extra_argument_without_excess_slot() {
        let first = Slot::new();
        let mut app = App::builder("prog")
            .required_arg(Argument::new("first", Str.store(&first)))
            .build()
            .unwrap();
        assert_eq!(
            app.run(&["a", "b"]),
            Outcome::Failed(vec![ParseError::ExtraArgument("b".into())])
        );
        assert_eq!(first.values(), ["a"]);
    }

    #[test]
    fn run_resets_counters_between_passes() {
        let mut f = fixture();
        assert_eq!(f.app.run(&["-b", "1", "in"]), Outcome::Parsed);
        assert_eq!(f.app.run(&["-b", "2", "in"]), Outcome::Parsed);
        assert_eq!(f.bar.values(), [1, 2]);
        assert!(f.app.errors().is_empty());
    }

    #[test]
    fn completes_long_flag_with_trailing_space() {
        let mut f = fixture();
        assert_eq!(
            complete(&mut f.app, &["--ar"]),
            Outcome::Complete(vec!["--arch ".into()])
        );
    }

    #[test]
    fn completes_values_clipped_after_word_break() {
        let mut f = fixture();
        assert_eq!(
            complete(&mut f.app, &["--arch=a"]),
            Outcome::Complete(vec!["arm".into(), "arm64".into()])
        );
        assert_eq!(
            complete(&mut f.app, &["--arch", "i"]),
            Outcome::Complete(vec!["ia32 ".into()])
        );
    }

    #[test]
    fn exhausted_flags_are_not_offered() {
        let mut f = fixture();
        assert_eq!(complete(&mut f.app, &["-b", "1", "--b"]), Outcome::Complete(vec![]));
        assert_eq!(
            complete(&mut f.app, &["-b", "1", "-"]),
            Outcome::Complete(vec![
                "-f".into(),
                "--".into(),
                "--foo".into(),
                "--arch".into(),
            ])
        );
    }

    #[test]
    fn completes_every_flag_in_registration_order() {
        let mut f = fixture();
        assert_eq!(
            complete(&mut f.app, &["-"]),
            Outcome::Complete(vec![
                "-f".into(),
                "-b".into(),
                "--".into(),
                "--foo".into(),
                "--bar".into(),
                "--arch".into(),
            ])
        );
    }

    #[test]
    fn completion_without_words_is_empty() {
        let mut f = fixture();
        assert_eq!(f.app.run(&[GENERATE_COMPLETION]), Outcome::Complete(vec![]));
    }

    #[test]
    fn completion_does_not_record_post_pass_errors() {
        let mut f = fixture();
        let _ = complete(&mut f.app, &["--f"]);
        assert!(f.app.errors().is_empty());
        assert!(f.arch.is_empty());
    }

    #[test]
    fn script_request_returns_bash_script() {
        let mut f = fixture();
        let Outcome::Script(script) = f.app.run(&[COMPLETION_SCRIPT]) else {
            panic!("expected a script");
        };
        assert!(script.contains("complete -o nospace -F _prog_bash_autocomplete prog"));
    }

    fn build_error(flag: Flag) -> ConfigError {
        match App::builder("prog").flag(flag).build() {
            Ok(_) => panic!("flag should be rejected"),
            Err(err) => err,
        }
    }

    #[test]
    fn build_rejects_bad_definitions() {
        assert_eq!(build_error(Flag::call(|| {})), ConfigError::Nameless);
        assert_eq!(
            build_error(Flag::call(|| {}).long("")),
            ConfigError::InvalidName(String::new())
        );
        assert_eq!(
            build_error(Flag::call(|| {}).long("a=b")),
            ConfigError::InvalidName("a=b".into())
        );
        assert_eq!(
            build_error(Flag::call(|| {}).long("-x")),
            ConfigError::InvalidName("-x".into())
        );
        assert_eq!(
            build_error(Flag::call(|| {}).short('-')),
            ConfigError::InvalidName("-".into())
        );
        assert_eq!(
            build_error(Flag::call(|| {}).long("foo").default_value("1")),
            ConfigError::DefaultWithoutValue("--foo".into())
        );
        assert_eq!(
            build_error(Flag::value(Str.call(|_| {})).short('x').min_uses(2).max_uses(1)),
            ConfigError::InvalidBounds {
                flag: "-x".into(),
                min: 2,
                max: 1,
            }
        );
    }

    #[test]
    fn build_rejects_duplicate_names() {
        let err = App::builder("prog")
            .flags([
                Flag::call(|| {}).long("foo").short('f'),
                Flag::call(|| {}).long("foo"),
            ])
            .build()
            .err();
        assert_eq!(err, Some(ConfigError::DuplicateLong("foo".into())));

        let err = App::builder("prog")
            .flags([
                Flag::call(|| {}).long("foo").short('f'),
                Flag::call(|| {}).long("fizz").short('f'),
            ])
            .build()
            .err();
        assert_eq!(err, Some(ConfigError::DuplicateShort('f')));
    }
}
