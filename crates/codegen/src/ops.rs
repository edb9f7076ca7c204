//! Host-level operations produced by lowering.
//!
//! A [`LoweredProgram`] is a flat, ordered list of [`Operation`]s except for
//! fetches, which carry their already-lowered body. The representation is
//! closed: a host walks it directly, there is no generated source text.

use crate::template::Template;
use indexmap::IndexMap;
use solas_parser::ast::Expr;

/// Header carrying the bearer token of `secure with`.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Bind `value` to `target` in the namespace.
    Assign { target: String, value: Expr },

    /// Append `times` step results to the list bound to `sequence`, in place.
    Loop {
        sequence: String,
        times: u64,
        step: Step,
    },

    /// Bounded retry around one GET. On success the parsed response is bound
    /// to `target`, `body` runs once and the loop exits. When every attempt
    /// fails a single drift report is made and execution continues.
    HttpFetch {
        target: String,
        url: String,
        policy: RetryPolicy,
        body: Vec<Operation>,
    },

    /// Keyed write into the persistence map.
    MapPut { key: String, value: Expr },

    /// Keyed read from the persistence map; binds null when absent.
    MapGet { key: String, target: String },

    Print(Output),

    /// A fragment lowering could not construct, kept for the host to reject.
    Raw { text: String, line: usize },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Assign { .. } => "Assign",
            Operation::Loop { .. } => "Loop",
            Operation::HttpFetch { .. } => "HttpFetch",
            Operation::MapPut { .. } => "MapPut",
            Operation::MapGet { .. } => "MapGet",
            Operation::Print(_) => "Print",
            Operation::Raw { .. } => "Raw",
        }
    }
}

/// The per-iteration computation of a growth loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Sum of the last two elements (of all elements when fewer exist).
    SumLastTwo,
    /// Evaluated against the current sequence on every iteration.
    Expr(Expr),
    /// Step text that is not an expression; fails when the loop runs.
    Opaque(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Template(Template),
    Value(Expr),
}

/// Attempt count and request headers for one fetch statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub headers: IndexMap<String, String>,
    attempts: u32,
}

impl RetryPolicy {
    /// `attempts` below one is raised to one.
    pub fn new(attempts: u32, headers: IndexMap<String, String>) -> Self {
        RetryPolicy {
            headers,
            attempts: attempts.max(1),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The request a single attempt makes.
    pub fn intent(&self, url: &str) -> FetchIntent {
        FetchIntent {
            url: url.to_string(),
            headers: self.headers.clone(),
        }
    }
}

/// An HTTP GET handed to the network collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchIntent {
    pub url: String,
    pub headers: IndexMap<String, String>,
}

/// The complete output of lowering one source unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoweredProgram {
    operations: Vec<Operation>,
}

impl LoweredProgram {
    pub fn new(operations: Vec<Operation>) -> Self {
        LoweredProgram { operations }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Retry policies of every fetch, nested ones included, in source order.
    pub fn retry_policies(&self) -> Vec<&RetryPolicy> {
        fn collect<'a>(ops: &'a [Operation], out: &mut Vec<&'a RetryPolicy>) {
            for op in ops {
                if let Operation::HttpFetch { policy, body, .. } = op {
                    out.push(policy);
                    collect(body, out);
                }
            }
        }

        let mut policies = Vec::new();
        collect(&self.operations, &mut policies);
        policies
    }
}

impl<'a> IntoIterator for &'a LoweredProgram {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
