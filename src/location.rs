//! Source locations and diagnostics.

use std::fmt;

/// A 1-indexed source position. `(0, 0)` denotes end-of-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub line: u32,
    pub col: u32,
}

impl Location {
    pub const fn new(line: u32, col: u32) -> Self {
        Location { line, col }
    }

    /// The sentinel location used for end-of-file diagnostics.
    pub const EOF: Location = Location { line: 0, col: 0 };

    pub fn is_eof(self) -> bool {
        self == Self::EOF
    }
}

/// Which pipeline stage raised a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Tokeniser,
    Parser,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Tokeniser => write!(f, "Tokeniser"),
            Stage::Parser => write!(f, "Parser"),
        }
    }
}

/// An error surfaced by the tokeniser or parser.
///
/// Diagnostics are plain values, never panics: the core never aborts the
/// process on malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub file_label: String,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(stage: Stage, file_label: impl Into<String>, location: Location, message: impl Into<String>) -> Self {
        Diagnostic {
            stage,
            file_label: file_label.into(),
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_eof() {
            write!(f, "{} (EOF) - {} error: {}", self.file_label, self.stage, self.message)
        } else {
            write!(
                f,
                "{}:{}:{} - {} error: {}",
                self.file_label, self.location.line, self.location.col, self.stage, self.message
            )
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Joins a file label and relative directory the way the tokeniser/parser
/// present a file in diagnostics: `(stdin)` for an empty label, otherwise
/// `relative_dir/file_label`.
pub fn pretty_file_label(relative_dir: &str, file_label: &str) -> String {
    if file_label.is_empty() {
        "(stdin)".to_string()
    } else if relative_dir.is_empty() {
        file_label.to_string()
    } else {
        format!("{relative_dir}/{file_label}")
    }
}
