//! Completion candidates and the protocol used to hand them to a shell.

/// Receives completion candidates.
///
/// A *final* candidate is a complete token. A *partial* candidate is a valid
/// prefix that can keep growing (a directory, a cluster of boolean short flags).
pub trait CompletionSink {
    fn partial_completion(&mut self, candidate: &str);
    fn final_completion(&mut self, candidate: &str);
}

/// Candidates collected during one completion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completions {
    candidates: Vec<String>,
    partial: bool,
    prefix: String,
}

impl Completions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal text already typed that precedes every candidate pushed from now on.
    pub(crate) fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Whether at least one partial candidate was produced.
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_candidates(self) -> Vec<String> {
        self.candidates
    }

    /// Render the lines a shell should receive.
    ///
    /// Each candidate is clipped at byte offset `clip` (see [`clip_point`]). A lone
    /// final candidate gets a trailing space so the shell moves on to the next word.
    pub fn render(&self, clip: usize) -> Vec<String> {
        let clipped = |c: &String| c.get(clip..).unwrap_or_default().to_string();
        match self.candidates.as_slice() {
            [only] if !self.partial => vec![format!("{} ", clipped(only))],
            all => all.iter().map(clipped).collect(),
        }
    }
}

impl CompletionSink for Completions {
    fn partial_completion(&mut self, candidate: &str) {
        self.candidates.push(format!("{}{}", self.prefix, candidate));
        self.partial = true;
    }

    fn final_completion(&mut self, candidate: &str) {
        self.candidates.push(format!("{}{}", self.prefix, candidate));
    }
}

/// Byte offset just past the last word-break character in `word`, or 0.
///
/// Shells such as bash split the current word on `COMP_WORDBREAKS`, so only the
/// text after the last break must be sent back.
pub fn clip_point(word: &str, wordbreaks: &str) -> usize {
    word.char_indices()
        .rev()
        .find(|(_, c)| wordbreaks.contains(*c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}
