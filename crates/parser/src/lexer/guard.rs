//! Whole-source complexity guard.
//!
//! The ceiling is global: it counts every boolean connective in the source,
//! independent of statement, nesting or scope. Words inside string literals
//! and comments are not code and do not count.

use super::cursor::SourceCursor;
use super::token::LogosToken;
use crate::error::{ErrorKind, ParseResult, error};
use text_size::TextRange;

/// Maximum number of boolean connectives allowed in one source unit.
pub const MAX_CONNECTIVES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexityGuard {
    total: usize,
}

impl ComplexityGuard {
    /// Count the connective words in `source`.
    pub fn scan(source: &str) -> Self {
        let total = SourceCursor::new(source)
            .filter(|raw| matches!(raw.token, Some(LogosToken::And | LogosToken::Or)))
            .count();
        ComplexityGuard { total }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Called before a connective keyword is emitted.
    pub fn check(&self, line: usize, span: TextRange) -> ParseResult<()> {
        if self.total > MAX_CONNECTIVES {
            return Err(error(
                ErrorKind::ComplexityOverflow {
                    count: self.total,
                    limit: MAX_CONNECTIVES,
                },
                line,
                span,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_strings_and_comments() {
        let guard = ComplexityGuard::scan("emit \"a and b and c\" // and and and\n");
        assert_eq!(guard.total(), 0);
    }

    #[test]
    fn counts_across_lines() {
        let guard = ComplexityGuard::scan("if a and b\nif c and d\nif e and f\n");
        assert_eq!(guard.total(), 3);
    }

    #[test]
    fn identifiers_containing_connectives_do_not_count() {
        let guard = ComplexityGuard::scan("band android order");
        assert_eq!(guard.total(), 0);
    }
}
