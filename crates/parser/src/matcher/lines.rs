//! Logical line splitting.
//!
//! A logical line starts at the first token of a physical line and extends
//! across later physical lines while any bracket opened on it is still open,
//! so a multi-line `{ ... }` block stays with the statement that opened it.

use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub tokens: &'a [Token],
}

impl<'a> Line<'a> {
    /// 1-based line of the first token.
    pub fn number(&self) -> usize {
        self.tokens.first().map(|token| token.line).unwrap_or(1)
    }

    pub fn first(&self) -> Option<&'a Token> {
        self.tokens.first()
    }
}

pub fn split_lines(tokens: &[Token]) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut depth = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        if i > start && depth == 0 && token.line > tokens[i - 1].line {
            lines.push(Line {
                tokens: &tokens[start..i],
            });
            start = i;
        }
        match token.kind {
            TokenKind::LeftBrace | TokenKind::LeftParen | TokenKind::LeftBracket => depth += 1,
            TokenKind::RightBrace | TokenKind::RightParen | TokenKind::RightBracket => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    if start < tokens.len() {
        lines.push(Line {
            tokens: &tokens[start..],
        });
    }

    lines
}
