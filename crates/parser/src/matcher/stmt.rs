//! Structural templates for the recognized statement shapes.

use super::cursor::TokenCursor;
use super::expr::{parse_args, parse_expr, parse_in};
use super::lines::{Line, split_lines};
use super::match_line;
use crate::ast::{
    Channel, Emission, Endpoint, FetchDirectives, FetchStatement, GrowStatement, Statement,
    StatementKind, StepSpec, StorageDirective, render_tokens,
};
use crate::error::{Error, ErrorKind, ParseResult, error};
use crate::lexer::{Keyword, Namespace, Token, TokenKind};
use text_size::TextRange;

/// `store <expr> as <key>` or `recall <key> into <target>`.
pub(super) fn match_storage(line: Line<'_>) -> ParseResult<Statement> {
    let mut cursor = TokenCursor::new(line.tokens);

    let (keyword, directive) = if cursor.eat_keyword(Keyword::Store) {
        (Keyword::Store, store_template(&mut cursor))
    } else {
        (Keyword::Recall, recall_template(&mut cursor))
    };
    let directive = directive.map_err(|reason| malformed(keyword, &line, reason))?;

    Ok(Statement::new(
        StatementKind::Storage(directive),
        line.number(),
    ))
}

fn store_template(cursor: &mut TokenCursor<'_>) -> Result<StorageDirective, String> {
    let value = parse_in(cursor)?;
    cursor.expect_keyword(Keyword::As)?;
    let key = cursor.expect_ident("a key name after 'as'")?.to_string();
    cursor.expect_end()?;
    Ok(StorageDirective::Store { value, key })
}

fn recall_template(cursor: &mut TokenCursor<'_>) -> Result<StorageDirective, String> {
    cursor.expect_keyword(Keyword::Recall)?;
    let key = cursor.expect_ident("a key name")?.to_string();
    cursor.expect_keyword(Keyword::Into)?;
    let target = cursor.expect_ident("a target name after 'into'")?.to_string();
    cursor.expect_end()?;
    Ok(StorageDirective::Recall { key, target })
}

/// `grow <target> to <limit> { init [<seed>] step: <expr> }`
pub(super) fn match_grow(line: Line<'_>) -> ParseResult<Statement> {
    let grow = grow_template(&mut TokenCursor::new(line.tokens))
        .map_err(|reason| malformed(Keyword::Grow, &line, reason))?;

    Ok(Statement::new(StatementKind::Grow(grow), line.number()))
}

fn grow_template(cursor: &mut TokenCursor<'_>) -> Result<GrowStatement, String> {
    cursor.expect_keyword(Keyword::Grow)?;
    let target = cursor.expect_ident("a sequence name")?.to_string();
    cursor.expect_keyword(Keyword::To)?;
    let limit_token = cursor.expect(TokenKind::Number, "an iteration limit")?;
    let limit = limit_token
        .text
        .parse::<u64>()
        .map_err(|_| format!("limit '{}' is not a whole number", limit_token.text))?;

    let block = cursor.expect_trailing_block()?;
    let mut inner = TokenCursor::new(block);
    inner.expect_keyword(Keyword::Init)?;
    inner.expect(TokenKind::LeftBracket, "'[' opening the seed list")?;
    let seed = parse_args(&mut inner, TokenKind::RightBracket, "']'")?;
    inner.expect_keyword(Keyword::Step)?;
    inner.expect(TokenKind::Colon, "':' after 'step'")?;

    let step_tokens = inner.rest();
    if step_tokens.is_empty() {
        return Err("missing step expression".to_string());
    }

    Ok(GrowStatement {
        target,
        limit,
        seed,
        step: step_spec(step_tokens),
    })
}

/// Recognize the built-in reducer; anything else passes through.
fn step_spec(tokens: &[Token]) -> StepSpec {
    match parse_expr(tokens) {
        Ok(expr) if expr.is_sum_of_last_two() => StepSpec::SumLastTwo,
        Ok(expr) => StepSpec::Expr(expr),
        Err(_) => StepSpec::Opaque(render_tokens(tokens)),
    }
}

/// `stream <target> from @net.<api|stream>("<url>") { <body> }`
pub(super) fn match_fetch(line: Line<'_>) -> ParseResult<Statement> {
    let (target, endpoint, block) = fetch_header(&mut TokenCursor::new(line.tokens))
        .map_err(|reason| malformed(Keyword::Stream, &line, reason))?;
    let mut directives = FetchDirectives::default();
    let mut seen = DirectivesSeen::default();
    let mut body = Vec::new();

    for body_line in split_lines(block) {
        if is_directive(&body_line) {
            extract_directives(&body_line, &mut directives, &mut seen)
                .map_err(|reason| malformed(Keyword::Stream, &body_line, reason))?;
        } else {
            body.push(match_line(body_line)?);
        }
    }

    tracing::debug!(
        result = %target,
        attempts = directives.attempts,
        secured = directives.credential.is_some(),
        body = body.len(),
        "matched fetch statement"
    );

    Ok(Statement::new(
        StatementKind::Fetch(FetchStatement {
            target,
            endpoint,
            directives,
            body,
        }),
        line.number(),
    ))
}

/// Everything up to and including the body block.
fn fetch_header<'a>(
    cursor: &mut TokenCursor<'a>,
) -> Result<(String, Endpoint, &'a [Token]), String> {
    cursor.expect_keyword(Keyword::Stream)?;
    let target = cursor.expect_ident("a result name")?.to_string();
    cursor.expect_keyword(Keyword::From)?;
    cursor.expect(TokenKind::ResourceRoot(Namespace::Net), "'@net'")?;
    cursor.expect(TokenKind::Dot, "'.' after '@net'")?;
    let channel = match cursor.advance() {
        Some(token) if token.kind == TokenKind::Ident && token.text == "api" => Channel::Api,
        Some(token) if token.is_keyword(Keyword::Stream) => Channel::Stream,
        Some(token) => {
            return Err(format!(
                "expected 'api' or 'stream' after '@net.', found '{}'",
                token.text
            ));
        }
        None => return Err("expected 'api' or 'stream' after '@net.'".to_string()),
    };
    cursor.expect(TokenKind::LeftParen, "'('")?;
    let url = cursor.expect(TokenKind::StringLiteral, "a quoted URL")?;
    let url = url.string_value().unwrap_or_default().to_string();
    cursor.expect(TokenKind::RightParen, "')'")?;
    let block = cursor.expect_trailing_block()?;
    Ok((target, Endpoint { channel, url }, block))
}

/// A body line is a directive when it holds `secure with` or `retry`.
fn is_directive(line: &Line<'_>) -> bool {
    let secure = line
        .tokens
        .windows(2)
        .any(|pair| pair[0].is_keyword(Keyword::Secure) && pair[1].is_keyword(Keyword::With));
    secure || line.tokens.iter().any(|token| token.is_keyword(Keyword::Retry))
}

#[derive(Default)]
struct DirectivesSeen {
    credential: bool,
    retry: bool,
}

/// Pull credential and attempt count out of a directive line. The first
/// occurrence of each directive in a body wins; other tokens on a directive
/// line are dropped with it.
fn extract_directives(
    line: &Line<'_>,
    directives: &mut FetchDirectives,
    seen: &mut DirectivesSeen,
) -> Result<(), String> {
    let mut cursor = TokenCursor::new(line.tokens);

    while let Some(token) = cursor.advance() {
        if token.is_keyword(Keyword::Secure) && cursor.eat_keyword(Keyword::With) {
            let name = parse_credential(&mut cursor)?;
            if !seen.credential {
                directives.credential = Some(name);
                seen.credential = true;
            }
        } else if token.is_keyword(Keyword::Retry) {
            let attempts = parse_retry(&mut cursor)?;
            if !seen.retry {
                directives.attempts = attempts;
                seen.retry = true;
            }
        }
    }

    Ok(())
}

/// `@env.<name>` or `@env("<name>")`.
fn parse_credential(cursor: &mut TokenCursor<'_>) -> Result<String, String> {
    cursor.expect(
        TokenKind::ResourceRoot(Namespace::Env),
        "'@env' after 'secure with'",
    )?;
    if cursor.eat(TokenKind::Dot).is_some() {
        return cursor
            .expect_ident("a credential name after '@env.'")
            .map(str::to_string);
    }
    cursor.expect(TokenKind::LeftParen, "'.' or '(' after '@env'")?;
    let name = cursor.expect(TokenKind::StringLiteral, "a quoted credential name")?;
    let name = name.string_value().unwrap_or_default().to_string();
    cursor.expect(TokenKind::RightParen, "')'")?;
    Ok(name)
}

/// `(<n>)` after `retry`, with `n >= 1`.
fn parse_retry(cursor: &mut TokenCursor<'_>) -> Result<u32, String> {
    cursor.expect(TokenKind::LeftParen, "'(' after 'retry'")?;
    let count = cursor.expect(TokenKind::Number, "an attempt count")?;
    let attempts = count
        .text
        .parse::<u32>()
        .map_err(|_| format!("attempt count '{}' is not a whole number", count.text))?;
    if attempts == 0 {
        return Err("retry needs at least one attempt".to_string());
    }
    cursor.expect(TokenKind::RightParen, "')'")?;
    Ok(attempts)
}

/// `emit "<template>"` or `emit <expr>`.
pub(super) fn match_emit(line: Line<'_>) -> ParseResult<Statement> {
    let emission = emit_template(&mut TokenCursor::new(line.tokens))
        .map_err(|reason| malformed(Keyword::Emit, &line, reason))?;

    Ok(Statement::new(StatementKind::Emit(emission), line.number()))
}

fn emit_template(cursor: &mut TokenCursor<'_>) -> Result<Emission, String> {
    cursor.expect_keyword(Keyword::Emit)?;
    let rest = cursor.rest();
    match rest {
        [] => Err("nothing to emit".to_string()),
        [literal] if literal.kind == TokenKind::StringLiteral => Ok(Emission::Template(
            literal.string_value().unwrap_or_default().to_string(),
        )),
        _ => parse_expr(rest).map(Emission::Value),
    }
}

fn malformed(keyword: Keyword, line: &Line<'_>, reason: String) -> Box<Error> {
    error(
        ErrorKind::malformed(keyword.as_str(), reason),
        line.number(),
        line_span(line),
    )
}

fn line_span(line: &Line<'_>) -> TextRange {
    match (line.tokens.first(), line.tokens.last()) {
        (Some(first), Some(last)) => TextRange::new(first.start(), last.end()),
        _ => TextRange::default(),
    }
}
