use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

/// Values collected by one successful parse.
#[derive(Debug, Serialize)]
pub struct Report {
    pub foo: bool,
    pub bar: Option<i32>,
    pub verbosity: Option<i32>,
    pub jobs: Option<i32>,
    pub arch: Option<String>,
    pub input: Option<PathBuf>,
    pub files: Vec<PathBuf>,
}

fn or_none<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

impl Report {
    /// One `key value` line per field.
    pub fn write_lines(&self, out: &mut impl Write) -> io::Result<()> {
        let files: Vec<String> = self.files.iter().map(|f| f.display().to_string()).collect();
        writeln!(out, "foo {}", self.foo)?;
        writeln!(out, "bar {}", or_none(self.bar))?;
        writeln!(out, "verbosity {}", or_none(self.verbosity))?;
        writeln!(out, "jobs {}", or_none(self.jobs))?;
        writeln!(out, "arch {}", or_none(self.arch.as_deref()))?;
        writeln!(
            out,
            "input {}",
            or_none(self.input.as_ref().map(|p| p.display()))
        )?;
        writeln!(out, "files {}", files.join(" "))?;
        Ok(())
    }
}
