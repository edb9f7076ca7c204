//! Error handling for the Solas front end.
//!
//! Lexical and matching errors are fatal: the first one halts the pipeline
//! and no partial program is produced. Every error carries its 1-based line
//! and converts into a stage-tagged [`Diagnostic`] for the host to present.

pub mod codes;
pub mod diagnostic;
pub mod kinds;
pub mod types;

pub use codes::ErrorCode;
pub use diagnostic::{Diagnostic, Stage};
pub use kinds::ErrorKind;
pub use types::{Error, error};

/// Result type used by the lexer and the statement matcher.
pub type ParseResult<T> = Result<T, Box<Error>>;
