//! Matched statement model.
//!
//! This is not a general syntax tree: it only describes the fixed set of
//! statement shapes the matcher recognizes, plus the small expression
//! language that appears inside them.

pub mod display;
pub mod expr;
pub mod nodes;

pub use display::render_tokens;
pub use expr::{Expr, Number};
pub use nodes::*;
