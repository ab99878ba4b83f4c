mod report;

use std::cell::Cell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use cmdline::value::{Enum, FilePath, Int, Slot, ValueParser};
use cmdline::{App, Argument, Flag, Outcome};
use tracing_subscriber::{EnvFilter, fmt};

use crate::report::Report;

const NAME: &str = "cmdline-playground";

/// Shared cells the flag handlers write into.
#[derive(Default)]
struct Values {
    foo: Rc<Cell<bool>>,
    json: Rc<Cell<bool>>,
    bar: Slot<i32>,
    verbosity: Slot<i32>,
    jobs: Slot<i32>,
    arch: Slot<String>,
    input: Slot<PathBuf>,
    files: Slot<PathBuf>,
}

impl Values {
    fn report(&self) -> Report {
        Report {
            foo: self.foo.get(),
            bar: self.bar.get(),
            verbosity: self.verbosity.get(),
            jobs: self.jobs.get(),
            arch: self.arch.get(),
            input: self.input.get(),
            files: self.files.values(),
        }
    }
}

fn set_true(cell: &Rc<Cell<bool>>) -> impl FnMut() + 'static {
    let cell = Rc::clone(cell);
    move || cell.set(true)
}

fn build_app(values: &Values) -> Result<App> {
    let arch = Enum::new(["arm", "arm64", "ia32", "x64"]);
    App::builder(NAME)
        .flags([
            Flag::call(set_true(&values.foo)).long("foo").short('f'),
            Flag::value(Int::<i32>::new().store(&values.bar))
                .long("bar")
                .short('b')
                .required()
                .max_uses(1),
            Flag::value(Int::<i32>::new().store(&values.verbosity))
                .long("verbosity")
                .short('v')
                .default_value("0"),
            Flag::value(Int::<i32>::new().store(&values.jobs))
                .long("jobs")
                .short('j')
                .default_value("32"),
            Flag::value(arch.store(&values.arch))
                .long("arch")
                .default_value("arm64"),
            Flag::value(FilePath::new().must_exist().store(&values.input))
                .long("input")
                .short('i'),
            Flag::call(set_true(&values.json)).long("json"),
        ])
        .excess_args(Argument::new("files", FilePath::new().store(&values.files)))
        .build()
        .context("invalid command-line definition")
}

fn main() -> Result<ExitCode> {
    init_tracing();

    let args = std::env::args_os()
        .skip(1)
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow!("argument is not valid UTF-8: {}", arg.to_string_lossy()))
        })
        .collect::<Result<Vec<_>>>()?;

    let values = Values::default();
    let mut app = build_app(&values)?;
    tracing::debug!(count = args.len(), "running {NAME}");

    let mut stdout = io::stdout().lock();
    match app.run(&args) {
        Outcome::Complete(lines) => {
            for line in lines {
                writeln!(stdout, "{line}")?;
            }
        }
        Outcome::Script(script) => {
            write!(stdout, "{script}")?;
        }
        Outcome::Failed(errors) => {
            let mut stderr = io::stderr().lock();
            for err in &errors {
                writeln!(stderr, "error: {err}")?;
            }
            writeln!(stderr)?;
            write!(stderr, "{}", app.help())?;
            return Ok(ExitCode::FAILURE);
        }
        Outcome::Parsed => {
            let report = values.report();
            if values.json.get() {
                let json = serde_json::to_string_pretty(&report)
                    .context("failed to serialize report")?;
                writeln!(stdout, "{json}")?;
            } else {
                report.write_lines(&mut stdout)?;
            }
        }
    }
    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so completion output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
