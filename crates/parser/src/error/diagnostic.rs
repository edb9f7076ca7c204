//! Stage-tagged diagnostics handed to the host.

use super::codes::ErrorCode;
use std::fmt;

/// Pipeline stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lex,
    Match,
    Lower,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Lex => "Lexical Error",
            Stage::Match => "Statement Error",
            Stage::Lower => "Lowering Error",
        }
    }
}

/// A single structured error report: `{stage, message, line}`.
///
/// Presentation is left to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
    pub line: usize,
    pub code: Option<ErrorCode>,
    pub file: Option<String>,
}

impl Diagnostic {
    pub fn new(stage: Stage, message: String, line: usize) -> Self {
        Diagnostic {
            stage,
            message,
            line,
            code: None,
            file: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_file(mut self, file: String) -> Self {
        self.file = Some(file);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = match &self.file {
            Some(file) => format!("{}:{}", file, self.line),
            None => format!("line {}", self.line),
        };

        match self.code {
            Some(code) => write!(
                f,
                "{} [{}] at {}\n  {}",
                self.stage.label(),
                code,
                location,
                self.message
            ),
            None => write!(f, "{} at {}\n  {}", self.stage.label(), location, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}
