use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::ValueParser;
use crate::completion::CompletionSink;
use crate::error::ValueError;

type EntryFilter = Box<dyn Fn(&fs::DirEntry) -> bool>;

/// A path on the local filesystem, optionally resolved against a root directory.
///
/// Completion lists the directory named by the typed text up to its last `/`,
/// keeping entries whose name starts with the rest. Directories are offered as
/// partial candidates ending in `/` so the shell keeps completing inside them.
#[derive(Default)]
pub struct FilePath {
    root: Option<PathBuf>,
    must_exist: bool,
    filter: Option<EntryFilter>,
}

impl FilePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root` instead of the working directory.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Reject paths that do not exist.
    pub fn must_exist(mut self) -> Self {
        self.must_exist = true;
        self
    }

    /// Only offer directory entries accepted by `filter` as completions.
    pub fn filter(mut self, filter: impl Fn(&fs::DirEntry) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    fn effective_path(&self, text: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(text),
            None if text.is_empty() => PathBuf::from("."),
            None => PathBuf::from(text),
        }
    }

    fn accepts(&self, entry: &fs::DirEntry) -> bool {
        self.filter.as_ref().is_none_or(|f| f(entry))
    }
}

fn is_dir(entry: &fs::DirEntry) -> bool {
    // Follow symlinks so a link to a directory completes like one.
    fs::metadata(entry.path())
        .map(|m| m.is_dir())
        .or_else(|_| entry.file_type().map(|t| t.is_dir()))
        .unwrap_or(false)
}

impl ValueParser for FilePath {
    type Value = PathBuf;

    fn parse(&self, text: &str) -> Result<PathBuf, ValueError> {
        let path = self.effective_path(text);
        if self.must_exist {
            match fs::metadata(&path) {
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    return Err(ValueError::NoSuchFile(path));
                }
                // Existence unknown: let the program find out when it opens the path.
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "cannot check path");
                }
                Ok(_) => {}
            }
        }
        Ok(PathBuf::from(text))
    }

    fn type_name(&self) -> String {
        let mut name = if self.must_exist {
            "existing file".to_string()
        } else {
            "file path".to_string()
        };
        if let Some(root) = &self.root {
            name.push_str(" in ");
            name.push_str(&root.display().to_string());
        }
        name
    }

    fn complete(&self, text: &str, sink: &mut dyn CompletionSink) {
        let split = text.rfind('/').map_or(0, |i| i + 1);
        let (dir, prefix) = text.split_at(split);

        let entries = match fs::read_dir(self.effective_path(dir)) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(dir = %Path::new(dir).display(), error = %err, "cannot list directory");
                return;
            }
        };

        let mut matches: Vec<(String, bool)> = entries
            .filter_map(Result::ok)
            .filter(|entry| self.accepts(entry))
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                name.starts_with(prefix).then(|| (name, is_dir(&entry)))
            })
            .collect();
        matches.sort();

        for (name, dir_entry) in matches {
            if dir_entry {
                sink.partial_completion(&format!("{dir}{name}/"));
            } else {
                sink.final_completion(&format!("{dir}{name}"));
            }
        }
    }
}
