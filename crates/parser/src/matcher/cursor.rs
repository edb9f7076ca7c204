//! Token cursor shared by the statement templates.

use crate::lexer::{Keyword, Token, TokenKind};

/// Forward-only cursor over the tokens of one logical line.
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    current: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenCursor { tokens, current: 0 }
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.current)
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.current)?;
        self.current += 1;
        Some(token)
    }

    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Tokens not yet consumed.
    pub fn rest(&self) -> &'a [Token] {
        &self.tokens[self.current.min(self.tokens.len())..]
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    pub fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(TokenKind::Keyword(keyword)).is_some()
    }

    /// Consume a token of `kind` or describe what was found instead.
    pub fn expect(&mut self, kind: TokenKind, what: &str) -> Result<&'a Token, String> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.current += 1;
                Ok(token)
            }
            Some(token) => Err(format!("expected {}, found '{}'", what, token.text)),
            None => Err(format!("expected {}, found end of statement", what)),
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), String> {
        self.expect(TokenKind::Keyword(keyword), &format!("'{}'", keyword.as_str()))
            .map(|_| ())
    }

    pub fn expect_ident(&mut self, what: &str) -> Result<&'a str, String> {
        self.expect(TokenKind::Ident, what).map(|token| token.text.as_str())
    }

    pub fn expect_end(&self) -> Result<(), String> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(format!("unexpected trailing '{}'", token.text)),
        }
    }

    /// Split off a `{ ... }` block that must close the line.
    ///
    /// Returns the tokens between the braces.
    pub fn expect_trailing_block(&mut self) -> Result<&'a [Token], String> {
        self.expect(TokenKind::LeftBrace, "'{'")?;
        let rest = self.rest();
        match rest.last() {
            Some(last) if last.kind == TokenKind::RightBrace => {
                let inner = &rest[..rest.len() - 1];
                if closing_index(inner).is_some() {
                    return Err("block closes before the end of the statement".to_string());
                }
                self.current = self.tokens.len();
                Ok(inner)
            }
            _ => Err("expected '}' closing the block".to_string()),
        }
    }
}

/// Index of the first `}` in `tokens` that is not matched by a `{` before it.
fn closing_index(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LeftBrace => depth += 1,
            TokenKind::RightBrace => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}
