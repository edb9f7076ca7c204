//! Expression parsing over a token slice.
//!
//! ```text
//! expr    := primary ( '.' name | '[' expr ']' )*
//! primary := STRING | NUMBER | IDENT ( '(' args ')' )?
//!          | RESOURCE ( '.' name )* | '[' args ']' | '(' expr ')'
//! args    := ( expr ( ',' expr )* )?
//! ```

use super::cursor::TokenCursor;
use crate::ast::{Expr, Number};
use crate::lexer::{Token, TokenKind};

/// Parse all of `tokens` as a single expression.
pub fn parse_expr(tokens: &[Token]) -> Result<Expr, String> {
    let mut cursor = TokenCursor::new(tokens);
    let expr = parse_in(&mut cursor)?;
    cursor.expect_end()?;
    Ok(expr)
}

/// Parse one expression starting at the cursor, leaving the cursor after it.
pub fn parse_in(cursor: &mut TokenCursor<'_>) -> Result<Expr, String> {
    let mut expr = parse_primary(cursor)?;

    loop {
        if cursor.eat(TokenKind::Dot).is_some() {
            let field = parse_name(cursor)?;
            expr = Expr::field(expr, field);
        } else if cursor.eat(TokenKind::LeftBracket).is_some() {
            let index = parse_in(cursor)?;
            cursor.expect(TokenKind::RightBracket, "']'")?;
            expr = Expr::Index {
                base: Box::new(expr),
                index: Box::new(index),
            };
        } else {
            return Ok(expr);
        }
    }
}

fn parse_primary(cursor: &mut TokenCursor<'_>) -> Result<Expr, String> {
    let Some(token) = cursor.advance() else {
        return Err("expected an expression".to_string());
    };

    match token.kind {
        TokenKind::StringLiteral => Ok(Expr::Str(
            token.string_value().unwrap_or_default().to_string(),
        )),
        TokenKind::Number => Number::parse(&token.text)
            .map(Expr::Number)
            .ok_or_else(|| format!("invalid number '{}'", token.text)),
        TokenKind::Ident => {
            if cursor.eat(TokenKind::LeftParen).is_some() {
                let args = parse_args(cursor, TokenKind::RightParen, "')'")?;
                Ok(Expr::call(token.text.clone(), args))
            } else {
                Ok(Expr::Ident(token.text.clone()))
            }
        }
        TokenKind::ResourceRoot(namespace) => {
            let mut path = Vec::new();
            while cursor.eat(TokenKind::Dot).is_some() {
                path.push(parse_name(cursor)?);
            }
            Ok(Expr::Resource { namespace, path })
        }
        TokenKind::LeftBracket => {
            let items = parse_args(cursor, TokenKind::RightBracket, "']'")?;
            Ok(Expr::List(items))
        }
        TokenKind::LeftParen => {
            let inner = parse_in(cursor)?;
            cursor.expect(TokenKind::RightParen, "')'")?;
            Ok(inner)
        }
        _ => Err(format!("expected an expression, found '{}'", token.text)),
    }
}

/// Comma-separated expressions up to and including `close`.
pub fn parse_args(
    cursor: &mut TokenCursor<'_>,
    close: TokenKind,
    what: &str,
) -> Result<Vec<Expr>, String> {
    let mut items = Vec::new();
    if cursor.eat(close).is_some() {
        return Ok(items);
    }

    loop {
        items.push(parse_in(cursor)?);
        if cursor.eat(TokenKind::Comma).is_some() {
            continue;
        }
        cursor.expect(close, what)?;
        return Ok(items);
    }
}

/// A field name after `.`; reserved words are allowed here.
fn parse_name(cursor: &mut TokenCursor<'_>) -> Result<String, String> {
    match cursor.advance() {
        Some(token)
            if matches!(
                token.kind,
                TokenKind::Ident | TokenKind::Keyword(_) | TokenKind::TypeName
            ) =>
        {
            Ok(token.text.clone())
        }
        Some(token) => Err(format!("expected a name after '.', found '{}'", token.text)),
        None => Err("expected a name after '.'".to_string()),
    }
}
