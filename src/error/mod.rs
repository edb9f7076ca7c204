use crate::config::ConfigError;
use crate::transport::FetchError;
use solas_parser::Diagnostic;
use thiserror::Error;

pub type ExecResult<T> = Result<T, ExecError>;

/// Failures while running a lowered program. Outside a fetch these stop the
/// run; inside a fetch they fail the current attempt.
#[derive(Debug, Error)]
pub enum ExecError {
  #[error("name '{0}' is not defined")]
  UndefinedName(String),

  #[error("unsupported statement at line {line}: {text}")]
  Unsupported { line: usize, text: String },

  #[error("unsupported step expression: {0}")]
  UnsupportedStep(String),

  #[error("unknown function '{0}'")]
  UnknownFunction(String),

  #[error("invalid call to {name}(): {reason}")]
  InvalidCall { name: String, reason: String },

  #[error("expected {expected}, found {found}")]
  TypeMismatch {
    expected: &'static str,
    found: &'static str,
  },

  #[error("integer overflow in {0}")]
  Overflow(&'static str),

  #[error("index {index} out of range for list of length {len}")]
  IndexOutOfRange { index: i64, len: usize },

  #[error("key '{0}' not found")]
  KeyNotFound(String),

  #[error("resource '{0}' cannot be read here")]
  Resource(String),

  #[error(transparent)]
  Fetch(#[from] FetchError),

  #[error("failed to write output: {0}")]
  Io(#[from] std::io::Error),
}

/// Any failure of the compile-and-run pipeline.
#[derive(Debug, Error)]
pub enum SolasError {
  #[error("{0}")]
  Compile(#[from] Diagnostic),

  #[error(transparent)]
  Exec(#[from] ExecError),

  #[error(transparent)]
  Config(#[from] ConfigError),
}
