//! Token rendering for verbatim pass-through text.

use crate::lexer::{Keyword, Token, TokenKind};

/// Join tokens back into readable source text.
///
/// Spacing is normalized: no space around `.`, none inside brackets, none
/// before `,` or `:` and none between a callee and its `(`.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut previous: Option<TokenKind> = None;

    for token in tokens {
        if let Some(prev) = previous {
            if !glued(prev, token.kind) {
                out.push(' ');
            }
        }
        out.push_str(&token.text);
        previous = Some(token.kind);
    }

    out
}

fn glued(prev: TokenKind, next: TokenKind) -> bool {
    let after_opener = matches!(
        prev,
        TokenKind::Dot | TokenKind::LeftParen | TokenKind::LeftBracket
    );
    let before_closer = matches!(
        next,
        TokenKind::Dot
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::RightParen
            | TokenKind::RightBracket
    );
    let call = next == TokenKind::LeftParen
        && matches!(
            prev,
            TokenKind::Ident | TokenKind::ResourceRoot(_) | TokenKind::Keyword(Keyword::Retry)
        );

    after_opener || before_closer || call
}
