//! Statement nodes produced by the matcher.

use super::expr::Expr;

/// All statements of one source unit, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A matched statement and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub line: usize,
}

impl Statement {
    pub fn new(kind: StatementKind, line: usize) -> Self {
        Statement { kind, line }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `store <expr> as <key>` / `recall <key> into <target>`
    Storage(StorageDirective),
    /// `grow <target> to <limit> { init [...] step: ... }`
    Grow(GrowStatement),
    /// `stream <target> from @net.api("<url>") { ... }`
    Fetch(FetchStatement),
    /// `emit "<template>"` / `emit <expr>`
    Emit(Emission),
    /// A line that is none of the recognized shapes, kept verbatim.
    Raw(String),
}

/// One persistence operation against the shared key/value map.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageDirective {
    Store { value: Expr, key: String },
    Recall { key: String, target: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Store,
    Recall,
}

impl StorageDirective {
    pub fn operation(&self) -> StorageOp {
        match self {
            StorageDirective::Store { .. } => StorageOp::Store,
            StorageDirective::Recall { .. } => StorageOp::Recall,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            StorageDirective::Store { key, .. } | StorageDirective::Recall { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowStatement {
    pub target: String,
    pub limit: u64,
    pub seed: Vec<Expr>,
    pub step: StepSpec,
}

/// The per-iteration step of a growth statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StepSpec {
    /// `tail(2).sum`
    SumLastTwo,
    /// Any other well-formed expression, evaluated each iteration.
    Expr(Expr),
    /// Tokens that do not form an expression, kept as text.
    Opaque(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Api,
    Stream,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Api => "api",
            Channel::Stream => "stream",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub channel: Channel,
    pub url: String,
}

/// Metadata pulled out of the directive lines of a fetch body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDirectives {
    /// Credential named by `secure with @env.<name>`.
    pub credential: Option<String>,
    /// From `retry(<n>)`; 1 when absent.
    pub attempts: u32,
}

impl Default for FetchDirectives {
    fn default() -> Self {
        FetchDirectives {
            credential: None,
            attempts: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchStatement {
    pub target: String,
    pub endpoint: Endpoint,
    pub directives: FetchDirectives,
    /// Non-directive body lines, already matched, in source order.
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// String literal contents, placeholders still embedded.
    Template(String),
    Value(Expr),
}
