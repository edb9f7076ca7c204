//! The positioned front-end error.

use super::codes::ErrorCode;
use super::diagnostic::{Diagnostic, Stage};
use super::kinds::ErrorKind;
use std::fmt;
use text_size::TextRange;

/// A fatal lexing or matching error with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    /// 1-based line of the offending lexeme or statement.
    pub line: usize,
    pub span: TextRange,
}

impl Error {
    pub fn new(kind: ErrorKind, line: usize, span: TextRange) -> Self {
        Self { kind, line, span }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn stage(&self) -> Stage {
        self.kind.stage()
    }

    /// Convert this error to the host-facing diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.stage(), self.kind.to_string(), self.line).with_code(self.code())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at line {}", self.code(), self.kind, self.line)
    }
}

impl std::error::Error for Error {}

/// Creates a boxed error. Boxing keeps `ParseResult` small.
#[inline]
pub fn error(kind: ErrorKind, line: usize, span: TextRange) -> Box<Error> {
    Box::new(Error::new(kind, line, span))
}
