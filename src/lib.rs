//! Host side of the Solas toolchain.
//!
//! [`compile`] runs the front end and lowering; [`run`] also executes the
//! lowered program with the reference [`Evaluator`]. Configuration and the
//! credential mapping come from [`config`].

pub mod config;
pub mod error;
pub mod evaluator;
pub mod transport;

pub use config::{ConfigError, SolasConfig};
pub use error::{ExecError, ExecResult, SolasError};
pub use evaluator::value::Value;
pub use evaluator::{DRIFT_PREFIX, Evaluator, ExecutionContext};
pub use solas_codegen::{Credentials, LoweredProgram};
pub use solas_parser::Diagnostic;
pub use transport::{FetchError, Offline, Transport};

use std::io::Write;

/// Lex, match and lower `source`. The first lexical or matching error is
/// returned as a diagnostic and nothing is lowered.
pub fn compile(source: &str, credentials: &Credentials) -> Result<LoweredProgram, Diagnostic> {
  let program = solas_parser::parse(source).map_err(|err| err.to_diagnostic())?;
  Ok(solas_codegen::lower(&program, credentials))
}

/// Compile `source` and run it in a fresh context, returning the context for
/// inspection.
pub fn run<T: Transport, W: Write>(
  source: &str,
  credentials: &Credentials,
  transport: T,
  out: W,
) -> Result<ExecutionContext, SolasError> {
  let program = compile(source, credentials)?;
  let mut evaluator = Evaluator::new(transport, out);
  evaluator.execute(&program)?;
  Ok(evaluator.into_context())
}
