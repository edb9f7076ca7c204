//! # Solas Lowering
//!
//! Translates matched Solas statements into a closed sequence of host
//! operations:
//!
//! | Statement            | Operations                         |
//! |----------------------|------------------------------------|
//! | `store` / `recall`   | `MapPut` / `MapGet`                |
//! | `grow`               | `Assign` (seed) then `Loop`        |
//! | `stream`             | `HttpFetch` with a retry policy and lowered body |
//! | `emit`               | `Print`                            |
//! | anything else        | `Raw`                              |
//!
//! Lowering performs no I/O and is deterministic: lowering the same program
//! twice yields equal operations.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use solas_codegen::{Credentials, lower};
//! use solas_parser::parse;
//!
//! let program = parse("emit \"hello\"")?;
//! let lowered = lower(&program, &Credentials::new());
//! println!("{}", lowered);
//! ```

pub mod credentials;
pub mod lowering;
pub mod ops;
pub mod printer;
pub mod template;

pub use credentials::{Credentials, MISSING_CREDENTIAL};
pub use lowering::Lowerer;
pub use ops::{FetchIntent, LoweredProgram, Operation, Output, RetryPolicy, Step};
pub use template::{Accessor, Placeholder, Segment, Template};

/// Lower a matched program against the host's credential mapping.
pub fn lower(program: &solas_parser::Program, credentials: &Credentials) -> LoweredProgram {
    Lowerer::new(credentials).lower_program(program)
}
