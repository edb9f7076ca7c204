//! Statement matcher.
//!
//! Comments are dropped, the remaining tokens are split into logical lines
//! and each line is offered to the statement passes in a fixed order:
//! persistence, growth, network fetch, emission. A pass claims a line by its
//! leading keyword and then the line must fit that pass's template, or
//! matching fails with `MalformedStatement`. Lines no pass claims are kept
//! verbatim as raw statements.
//!
//! Fetch bodies are split and matched with the same passes before the
//! enclosing fetch statement is assembled, so a `store` or `grow` inside a
//! body becomes its own statement instead of literal body text.

mod cursor;
mod expr;
mod lines;
mod stmt;

pub use cursor::TokenCursor;
pub use expr::parse_expr;
pub use lines::{Line, split_lines};

use crate::ast::{Program, Statement, StatementKind, render_tokens};
use crate::error::ParseResult;
use crate::lexer::{Keyword, Token, TokenKind, TokenStream};

/// Statement passes, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Persistence,
    Growth,
    Fetch,
    Emission,
}

pub const PASSES: [Pass; 4] = [Pass::Persistence, Pass::Growth, Pass::Fetch, Pass::Emission];

impl Pass {
    /// Whether this pass owns a line opening with `keyword`.
    pub fn claims(self, keyword: Keyword) -> bool {
        match self {
            Pass::Persistence => matches!(keyword, Keyword::Store | Keyword::Recall),
            Pass::Growth => keyword == Keyword::Grow,
            Pass::Fetch => keyword == Keyword::Stream,
            Pass::Emission => keyword == Keyword::Emit,
        }
    }

    fn apply(self, line: Line<'_>) -> ParseResult<Statement> {
        match self {
            Pass::Persistence => stmt::match_storage(line),
            Pass::Growth => stmt::match_grow(line),
            Pass::Fetch => stmt::match_fetch(line),
            Pass::Emission => stmt::match_emit(line),
        }
    }
}

/// Consumes one token stream and produces the matched program.
pub struct Matcher {
    tokens: Vec<Token>,
}

impl Matcher {
    pub fn new(stream: TokenStream) -> Self {
        Matcher {
            tokens: stream.without_comments(),
        }
    }

    pub fn match_program(self) -> ParseResult<Program> {
        let statements = match_block(&self.tokens)?;
        tracing::debug!(statements = statements.len(), "matching complete");
        Ok(Program { statements })
    }
}

/// Match every logical line of `tokens`, stopping at the first error.
pub fn match_block(tokens: &[Token]) -> ParseResult<Vec<Statement>> {
    split_lines(tokens).into_iter().map(match_line).collect()
}

/// Match a single logical line.
pub fn match_line(line: Line<'_>) -> ParseResult<Statement> {
    if let Some(TokenKind::Keyword(keyword)) = line.first().map(|token| token.kind) {
        if keyword.is_statement_anchor() {
            if let Some(pass) = PASSES.iter().find(|pass| pass.claims(keyword)) {
                return pass.apply(line);
            }
        }
    }

    Ok(Statement::new(
        StatementKind::Raw(render_tokens(line.tokens)),
        line.number(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYWORDS: [Keyword; 20] = [
        Keyword::Stream,
        Keyword::Refract,
        Keyword::Drift,
        Keyword::Shape,
        Keyword::Emit,
        Keyword::If,
        Keyword::And,
        Keyword::Not,
        Keyword::Grow,
        Keyword::To,
        Keyword::Init,
        Keyword::Step,
        Keyword::Store,
        Keyword::As,
        Keyword::Recall,
        Keyword::Into,
        Keyword::From,
        Keyword::Secure,
        Keyword::With,
        Keyword::Retry,
    ];

    #[test]
    fn every_anchor_is_claimed_by_exactly_one_pass() {
        for keyword in KEYWORDS {
            let claimants = PASSES.iter().filter(|pass| pass.claims(keyword)).count();
            let expected = usize::from(keyword.is_statement_anchor());
            assert_eq!(claimants, expected, "{:?}", keyword);
        }
    }
}
