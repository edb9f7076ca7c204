//! Error codes for Solas diagnostics.

use std::fmt;

/// Stable error codes, grouped by stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // ===== Lexical Errors (E1xxx) =====
    E1001, // Prohibited construct
    E1002, // Unrecognized character
    E1003, // Complexity overflow

    // ===== Statement Errors (E2xxx) =====
    E2001, // Malformed statement
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
