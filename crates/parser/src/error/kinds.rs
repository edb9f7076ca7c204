//! Error kinds raised by the lexer and the statement matcher.

use super::codes::ErrorCode;
use super::diagnostic::Stage;
use thiserror::Error;

/// Every fatal front-end error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A banned lexical form (`or`, `++`, `+=`, `?`, `&`, `<<`, ...).
    #[error("prohibited construct '{lexeme}'")]
    ProhibitedConstruct { lexeme: String },

    /// A character no lexical rule accepts.
    #[error("dark logic detected: unexpected '{lexeme}'")]
    Mismatch { lexeme: String },

    /// More boolean connectives in the whole source than the ceiling allows.
    #[error("complexity overflow: {count} boolean connectives in source, limit is {limit}")]
    ComplexityOverflow { count: usize, limit: usize },

    /// A statement keyword whose body does not fit its template.
    #[error("malformed '{keyword}' statement: {reason}")]
    MalformedStatement { keyword: String, reason: String },
}

impl ErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            ErrorKind::ProhibitedConstruct { .. } => ErrorCode::E1001,
            ErrorKind::Mismatch { .. } => ErrorCode::E1002,
            ErrorKind::ComplexityOverflow { .. } => ErrorCode::E1003,
            ErrorKind::MalformedStatement { .. } => ErrorCode::E2001,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            ErrorKind::ProhibitedConstruct { .. }
            | ErrorKind::Mismatch { .. }
            | ErrorKind::ComplexityOverflow { .. } => Stage::Lex,
            ErrorKind::MalformedStatement { .. } => Stage::Match,
        }
    }

    pub(crate) fn malformed(keyword: &str, reason: impl Into<String>) -> Self {
        ErrorKind::MalformedStatement {
            keyword: keyword.to_string(),
            reason: reason.into(),
        }
    }
}
