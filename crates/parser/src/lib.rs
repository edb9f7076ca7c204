//! Solas front end: lexer and statement matcher.
//!
//! The lexer turns source text into an ordered [`TokenStream`] under a
//! restrictive grammar: a handful of lexical forms are banned outright and
//! the number of boolean connectives in a whole source unit is capped at
//! [`lexer::MAX_CONNECTIVES`]. The matcher then recognizes the four
//! statement shapes of the language structurally:
//!
//! - persistence: `store <expr> as <key>`, `recall <key> into <name>`
//! - growth: `grow <name> to <n> { init [..] step: <expr> }`
//! - network fetch: `stream <name> from @net.api("<url>") { .. }`
//! - emission: `emit "<template>"`, `emit <expr>`
//!
//! Anything else is kept as a raw statement. Both stages fail fast: the
//! first error stops the pipeline and no partial program is returned.
//!
//! ```no_run
//! use solas_parser::parse;
//!
//! let source = r#"
//! grow s to 5 {
//!     init [1, 1]
//!     step: tail(2).sum
//! }
//! emit s
//! "#;
//!
//! match parse(source) {
//!     Ok(program) => println!("{} statements", program.statements.len()),
//!     Err(error) => eprintln!("{}", error.to_diagnostic()),
//! }
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod matcher;

pub mod helpers;

pub use ast::{Program, Statement, StatementKind};
pub use error::{Diagnostic, Error, ErrorCode, ErrorKind, ParseResult, Stage};
pub use lexer::{Lexer, Token, TokenKind, TokenStream};
pub use matcher::Matcher;

/// Tokenize `source` without matching statements.
pub fn tokenize(source: &str) -> ParseResult<TokenStream> {
    Lexer::new(source).tokenize()
}

/// Lex and match `source` into a [`Program`].
pub fn parse(source: &str) -> ParseResult<Program> {
    let stream = tokenize(source)?;
    Matcher::new(stream).match_program()
}
