//! Emission templates.
//!
//! A template is the contents of an emitted string literal split into
//! literal text and `{placeholder}` segments. A placeholder names a value in
//! the namespace followed by any number of accessors:
//!
//! ```text
//! placeholder := ident ( '.' ident | '[' '\'' key '\'' ']' | '[' int ']' )*
//! ```
//!
//! Braces that do not enclose a well-formed placeholder are literal text, so
//! an emitted string may contain quotes and braces freely.

use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: SmallVec<[Segment; 4]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// `{root.field['key'][0]}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub root: String,
    pub path: SmallVec<[Accessor; 2]>,
    /// Text between the braces, as written.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    Field(String),
    Key(String),
    Index(i64),
}

impl Template {
    pub fn parse(text: &str) -> Self {
        let mut segments = SmallVec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                break;
            };
            let inner = &after[..close];

            // `{ {x}`: only the innermost brace can start a placeholder.
            if inner.contains('{') {
                literal.push_str(&rest[..=open]);
                rest = after;
                continue;
            }

            literal.push_str(&rest[..open]);
            match Placeholder::parse(inner) {
                Some(placeholder) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                }
                None => {
                    literal.push('{');
                    literal.push_str(inner);
                    literal.push('}');
                }
            }
            rest = &after[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Template { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(placeholder) => Some(placeholder),
            Segment::Literal(_) => None,
        })
    }

    /// True when the template is plain text.
    pub fn is_literal(&self) -> bool {
        self.placeholders().next().is_none()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Placeholder(placeholder) => write!(f, "{{{}}}", placeholder.source)?,
            }
        }
        Ok(())
    }
}

impl Placeholder {
    /// Parse the text between a pair of braces. Surrounding spaces are allowed.
    pub fn parse(inner: &str) -> Option<Placeholder> {
        let mut scanner = Scanner {
            text: inner.trim(),
            pos: 0,
        };
        let root = scanner.ident()?;
        let mut path = SmallVec::new();

        while !scanner.is_done() {
            if scanner.eat('.') {
                path.push(Accessor::Field(scanner.ident()?));
            } else if scanner.eat('[') {
                let accessor = if scanner.eat('\'') {
                    let key = scanner.take_until('\'')?;
                    Accessor::Key(key)
                } else {
                    Accessor::Index(scanner.integer()?)
                };
                if !scanner.eat(']') {
                    return None;
                }
                path.push(accessor);
            } else {
                return None;
            }
        }

        Some(Placeholder {
            root,
            path,
            source: inner.to_string(),
        })
    }
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Option<String> {
        let rest = self.rest();
        let first = rest.chars().next()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        self.pos += len;
        Some(rest[..len].to_string())
    }

    /// Text up to `end`, consuming the terminator.
    fn take_until(&mut self, end: char) -> Option<String> {
        let rest = self.rest();
        let len = rest.find(end)?;
        self.pos += len + end.len_utf8();
        Some(rest[..len].to_string())
    }

    fn integer(&mut self) -> Option<i64> {
        let rest = self.rest();
        let sign = usize::from(rest.starts_with('-'));
        let digits = rest[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len() - sign);
        if digits == 0 {
            return None;
        }
        let value = rest[..sign + digits].parse().ok()?;
        self.pos += sign + digits;
        Some(value)
    }
}
