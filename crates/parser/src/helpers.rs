//! Small conveniences shared by the CLI and the integration tests.

use crate::error::ParseResult;
use crate::lexer::{Lexer, TokenKind, TokenStream};

/// Token kinds of `source`, comments included.
pub fn tokenize_kinds(source: &str) -> ParseResult<Vec<TokenKind>> {
    let stream = Lexer::new(source).tokenize()?;
    Ok(stream.tokens().iter().map(|token| token.kind).collect())
}

/// Token texts of `source`, comments dropped.
pub fn code_texts(source: &str) -> ParseResult<Vec<String>> {
    let stream = Lexer::new(source).tokenize()?;
    Ok(stream
        .without_comments()
        .into_iter()
        .map(|token| token.text)
        .collect())
}

/// Two-column `TOKEN TYPE | VALUE` listing, one row per code token.
pub fn token_table(stream: &TokenStream) -> String {
    let mut out = format!("{:<12} | {}\n", "TOKEN TYPE", "VALUE");
    out.push_str(&format!("{:-<12}-+-{:-<5}\n", "", ""));
    for token in stream.tokens() {
        if token.kind == TokenKind::Comment {
            continue;
        }
        out.push_str(&format!("{:<12} | {}\n", token.kind.to_string(), token.text));
    }
    out
}
