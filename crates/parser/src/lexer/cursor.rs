//! Low-level cursor that walks raw lexemes and tracks line numbers.

use super::token::LogosToken;
use logos::Logos;
use text_size::{TextRange, TextSize};

/// One raw lexeme before classification.
#[derive(Debug, Clone, Copy)]
pub struct RawLexeme<'src> {
    /// `None` when no scanner pattern accepts the input at this position.
    pub token: Option<LogosToken>,
    pub text: &'src str,
    pub span: TextRange,
    /// 1-based line on which the lexeme starts.
    pub line: usize,
}

/// A cursor over the whole source. Newlines are yielded so the caller can
/// see them, but the line counter is advanced here.
pub struct SourceCursor<'src> {
    inner: logos::Lexer<'src, LogosToken>,
    line: usize,
}

impl<'src> SourceCursor<'src> {
    pub fn new(source: &'src str) -> Self {
        SourceCursor {
            inner: LogosToken::lexer(source),
            line: 1,
        }
    }
}

impl<'src> Iterator for SourceCursor<'src> {
    type Item = RawLexeme<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let range = self.inner.span();
        let text = self.inner.slice();
        let span = TextRange::new(
            TextSize::from(range.start as u32),
            TextSize::from(range.end as u32),
        );
        let line = self.line;

        let token = result.ok();
        match token {
            Some(LogosToken::Newline) => self.line += 1,
            // String literals may run across lines.
            Some(LogosToken::String) => self.line += text.matches('\n').count(),
            _ => {}
        }

        Some(RawLexeme {
            token,
            text,
            span,
            line,
        })
    }
}
