use super::ValueParser;
use crate::completion::CompletionSink;
use crate::error::ValueError;

/// Any text, taken verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct Str;

impl ValueParser for Str {
    type Value = String;

    fn parse(&self, text: &str) -> Result<String, ValueError> {
        Ok(text.to_string())
    }

    fn type_name(&self) -> String {
        "string".to_string()
    }
}

/// One member of a closed, case-sensitive set.
#[derive(Debug, Clone)]
pub struct Enum {
    possible: Vec<String>,
}

impl Enum {
    pub fn new<I, S>(possible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            possible: possible.into_iter().map(Into::into).collect(),
        }
    }

    pub fn possible(&self) -> &[String] {
        &self.possible
    }
}

impl ValueParser for Enum {
    type Value = String;

    fn parse(&self, text: &str) -> Result<String, ValueError> {
        if self.possible.iter().any(|p| p == text) {
            Ok(text.to_string())
        } else {
            Err(ValueError::NotInSet {
                text: text.to_string(),
                set: self.type_name(),
            })
        }
    }

    fn type_name(&self) -> String {
        format!("{{{}}}", self.possible.join(","))
    }

    fn complete(&self, text: &str, sink: &mut dyn CompletionSink) {
        for p in self.possible.iter().filter(|p| p.starts_with(text)) {
            sink.final_completion(p);
        }
    }
}
