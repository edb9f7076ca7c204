//! Main lexer implementation for source code.

use super::cursor::{RawLexeme, SourceCursor};
use super::guard::ComplexityGuard;
use super::rules::{LexRule, classify};
use super::token::{Keyword, LogosToken, Namespace, Token, TokenKind};
use crate::error::{ErrorKind, ParseResult, error};
use text_size::{TextRange, TextSize};

/// Ordered, fail-fast tokenizer.
///
/// At each position the longest lexeme is read and then classified through
/// the rule table; the first fatal classification stops lexing. Spaces and
/// tabs are skipped, newlines only advance the line counter, and comments
/// are kept as tokens so later stages can see and discard them.
pub struct Lexer<'src> {
    input: &'src str,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source.
    pub fn new(input: &'src str) -> Self {
        Lexer { input }
    }

    /// Tokenize the entire input.
    pub fn tokenize(&self) -> ParseResult<TokenStream> {
        let guard = ComplexityGuard::scan(self.input);
        let mut tokens: Vec<Token> = Vec::new();

        for raw in SourceCursor::new(self.input) {
            match classify(raw.token) {
                LexRule::Prohibited => {
                    return Err(error(
                        ErrorKind::ProhibitedConstruct {
                            lexeme: raw.text.to_string(),
                        },
                        raw.line,
                        raw.span,
                    ));
                }
                LexRule::Mismatch => return Err(mismatch(&raw)),
                LexRule::Layout => {}
                LexRule::Literal => {
                    let kind = match raw.token {
                        Some(LogosToken::Comment) => TokenKind::Comment,
                        _ => TokenKind::StringLiteral,
                    };
                    tokens.push(Token::new(kind, raw.text, raw.line, raw.span));
                }
                LexRule::ResourceRoot => {
                    let name = &raw.text[1..];
                    let Some(namespace) = Namespace::from_name(name) else {
                        return Err(error(
                            ErrorKind::Mismatch {
                                lexeme: raw.text.to_string(),
                            },
                            raw.line,
                            raw.span,
                        ));
                    };
                    tokens.push(Token::new(
                        TokenKind::ResourceRoot(namespace),
                        raw.text,
                        raw.line,
                        raw.span,
                    ));
                }
                LexRule::Reserved => match raw.token.and_then(LogosToken::keyword) {
                    Some(keyword) => {
                        if keyword.is_connective() {
                            guard.check(raw.line, raw.span)?;
                        }
                        if keyword == Keyword::Not && merge_is_not(&mut tokens, &raw) {
                            continue;
                        }
                        tokens.push(Token::new(
                            TokenKind::Keyword(keyword),
                            raw.text,
                            raw.line,
                            raw.span,
                        ));
                    }
                    None => tokens.push(Token::new(TokenKind::TypeName, raw.text, raw.line, raw.span)),
                },
                LexRule::Operand => {
                    let kind = match raw.token {
                        Some(LogosToken::Arrow) => TokenKind::Arrow,
                        Some(LogosToken::Comparator) => TokenKind::Comparator,
                        Some(LogosToken::Number) => TokenKind::Number,
                        _ => TokenKind::Ident,
                    };
                    tokens.push(Token::new(kind, raw.text, raw.line, raw.span));
                }
                LexRule::Structural => {
                    let kind = match raw.token {
                        Some(LogosToken::LeftBrace) => TokenKind::LeftBrace,
                        Some(LogosToken::RightBrace) => TokenKind::RightBrace,
                        Some(LogosToken::LeftParen) => TokenKind::LeftParen,
                        Some(LogosToken::RightParen) => TokenKind::RightParen,
                        Some(LogosToken::LeftBracket) => TokenKind::LeftBracket,
                        Some(LogosToken::RightBracket) => TokenKind::RightBracket,
                        Some(LogosToken::Colon) => TokenKind::Colon,
                        Some(LogosToken::Comma) => TokenKind::Comma,
                        _ => TokenKind::Dot,
                    };
                    tokens.push(Token::new(kind, raw.text, raw.line, raw.span));
                }
            }
        }

        tracing::debug!(
            tokens = tokens.len(),
            connectives = guard.total(),
            "lexing complete"
        );
        Ok(TokenStream::new(tokens))
    }
}

/// Report the first character of an unreadable lexeme.
fn mismatch(raw: &RawLexeme<'_>) -> Box<crate::error::Error> {
    let first = raw.text.chars().next().unwrap_or('\u{fffd}');
    let start = raw.span.start();
    let span = TextRange::new(start, start + TextSize::of(first));
    error(
        ErrorKind::Mismatch {
            lexeme: first.to_string(),
        },
        raw.line,
        span,
    )
}

/// Fold `is not` on one line into a single comparator.
fn merge_is_not(tokens: &mut [Token], raw: &RawLexeme<'_>) -> bool {
    let Some(last) = tokens.last_mut() else {
        return false;
    };
    if last.kind != TokenKind::Comparator || last.text != "is" || last.line != raw.line {
        return false;
    }
    last.text = "is not".to_string();
    last.span = last.span.cover(raw.span);
    true
}

/// The ordered output of one lexer run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drop comment tokens, leaving only code.
    pub fn without_comments(self) -> Vec<Token> {
        self.tokens
            .into_iter()
            .filter(|token| token.kind != TokenKind::Comment)
            .collect()
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
