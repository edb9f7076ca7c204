//! Token definition and types.

use logos::Logos;
use std::fmt;
use text_size::{TextRange, TextSize};

/// A positioned token.
///
/// Tokens are immutable once produced. `line` is 1-based and never decreases
/// across a token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub span: TextRange,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, span: TextRange) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            span,
        }
    }

    pub fn start(&self) -> TextSize {
        self.span.start()
    }

    pub fn end(&self) -> TextSize {
        self.span.end()
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// The contents of a string literal without its surrounding quotes.
    pub fn string_value(&self) -> Option<&str> {
        match self.kind {
            TokenKind::StringLiteral => self
                .text
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"')),
            _ => None,
        }
    }
}

/// Lexical token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    StringLiteral,
    ResourceRoot(Namespace),
    Keyword(Keyword),
    TypeName,
    Arrow,
    Comparator,
    Number,
    Ident,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    Dot,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Comment => write!(f, "COMMENT"),
            TokenKind::StringLiteral => write!(f, "STRING"),
            TokenKind::ResourceRoot(_) => write!(f, "RESOURCE"),
            TokenKind::Keyword(_) => write!(f, "KEYWORD"),
            TokenKind::TypeName => write!(f, "TYPE"),
            TokenKind::Arrow => write!(f, "ARROW"),
            TokenKind::Comparator => write!(f, "COMPARATOR"),
            TokenKind::Number => write!(f, "NUMBER"),
            TokenKind::Ident => write!(f, "IDENTIFIER"),
            TokenKind::LeftBrace | TokenKind::RightBrace => write!(f, "BLOCK"),
            TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::LeftBracket
            | TokenKind::RightBracket
            | TokenKind::Colon
            | TokenKind::Comma
            | TokenKind::Dot => write!(f, "PUNCT"),
        }
    }
}

/// Reserved words. `or` is deliberately absent: it never lexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Stream,
    Refract,
    Drift,
    Shape,
    Emit,
    If,
    And,
    Not,
    Grow,
    To,
    Init,
    Step,
    Store,
    As,
    Recall,
    Into,
    From,
    Secure,
    With,
    Retry,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Stream => "stream",
            Keyword::Refract => "refract",
            Keyword::Drift => "drift",
            Keyword::Shape => "shape",
            Keyword::Emit => "emit",
            Keyword::If => "if",
            Keyword::And => "and",
            Keyword::Not => "not",
            Keyword::Grow => "grow",
            Keyword::To => "to",
            Keyword::Init => "init",
            Keyword::Step => "step",
            Keyword::Store => "store",
            Keyword::As => "as",
            Keyword::Recall => "recall",
            Keyword::Into => "into",
            Keyword::From => "from",
            Keyword::Secure => "secure",
            Keyword::With => "with",
            Keyword::Retry => "retry",
        }
    }

    /// Words that combine boolean conditions and count toward the
    /// connective ceiling.
    pub fn is_connective(self) -> bool {
        matches!(self, Keyword::And)
    }

    /// Keywords that open one of the recognized statement shapes.
    pub fn is_statement_anchor(self) -> bool {
        matches!(
            self,
            Keyword::Grow | Keyword::Stream | Keyword::Store | Keyword::Recall | Keyword::Emit
        )
    }
}

/// The fixed set of resource namespaces that may follow `@`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Net,
    Data,
    Math,
    Core,
    Env,
    Cache,
}

impl Namespace {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "net" => Some(Namespace::Net),
            "data" => Some(Namespace::Data),
            "math" => Some(Namespace::Math),
            "core" => Some(Namespace::Core),
            "env" => Some(Namespace::Env),
            "cache" => Some(Namespace::Cache),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Net => "net",
            Namespace::Data => "data",
            Namespace::Math => "math",
            Namespace::Core => "core",
            Namespace::Env => "env",
            Namespace::Cache => "cache",
        }
    }
}

/// Logos-based raw token enum.
///
/// Logos gives maximal munch at each position; the priority between the
/// resulting lexeme classes is decided afterwards by the rule table in
/// `rules.rs`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub enum LogosToken {
    // Prohibited forms
    #[token("or")]
    Or,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("%=")]
    PercentEqual,
    #[token("&=")]
    AmpersandEqual,
    #[token("|=")]
    PipeEqual,
    #[token("^=")]
    CaretEqual,
    #[token("?")]
    Question,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("<<")]
    LeftShift,
    #[token(">>")]
    RightShift,

    // Trivia that is still tokenized
    #[regex(r"//[^\n]*")]
    Comment,
    #[regex(r#""[^"]*""#)]
    String,

    // `@name`; the name is checked against the namespace set afterwards
    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*")]
    Resource,

    #[token("stream")]
    Stream,
    #[token("refract")]
    Refract,
    #[token("drift")]
    Drift,
    #[token("shape")]
    Shape,
    #[token("emit")]
    Emit,
    #[token("if")]
    If,
    #[token("and")]
    And,
    #[token("not")]
    Not,
    #[token("grow")]
    Grow,
    #[token("to")]
    To,
    #[token("init")]
    Init,
    #[token("step")]
    Step,
    #[token("store")]
    Store,
    #[token("as")]
    As,
    #[token("recall")]
    Recall,
    #[token("into")]
    Into,
    #[token("from")]
    From,
    #[token("secure")]
    Secure,
    #[token("with")]
    With,
    #[token("retry")]
    Retry,

    #[token("int")]
    #[token("float")]
    #[token("str")]
    #[token("bool")]
    #[token("list")]
    #[token("map")]
    #[token("any")]
    TypeName,

    #[token("->")]
    Arrow,
    #[token("==")]
    #[token("!=")]
    #[token(">=")]
    #[token("<=")]
    #[token(">")]
    #[token("<")]
    #[token("is")]
    Comparator,
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    #[regex(r"\r?\n")]
    Newline,
}

impl LogosToken {
    /// Keyword carried by this raw token, if any.
    pub fn keyword(self) -> Option<Keyword> {
        let keyword = match self {
            LogosToken::Stream => Keyword::Stream,
            LogosToken::Refract => Keyword::Refract,
            LogosToken::Drift => Keyword::Drift,
            LogosToken::Shape => Keyword::Shape,
            LogosToken::Emit => Keyword::Emit,
            LogosToken::If => Keyword::If,
            LogosToken::And => Keyword::And,
            LogosToken::Not => Keyword::Not,
            LogosToken::Grow => Keyword::Grow,
            LogosToken::To => Keyword::To,
            LogosToken::Init => Keyword::Init,
            LogosToken::Step => Keyword::Step,
            LogosToken::Store => Keyword::Store,
            LogosToken::As => Keyword::As,
            LogosToken::Recall => Keyword::Recall,
            LogosToken::Into => Keyword::Into,
            LogosToken::From => Keyword::From,
            LogosToken::Secure => Keyword::Secure,
            LogosToken::With => Keyword::With,
            LogosToken::Retry => Keyword::Retry,
            _ => return None,
        };
        Some(keyword)
    }
}
