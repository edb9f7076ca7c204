//! Statement lowering.
//!
//! Each matched statement becomes a fragment of host operations; fragments
//! are concatenated in source order. Lowering never fails: a piece that
//! cannot be built is kept as an opaque fragment and rejected when the host
//! executes it.

mod emit;
mod fetch;
mod growth;
mod storage;

use crate::credentials::Credentials;
use crate::ops::{LoweredProgram, Operation};
use solas_parser::ast::{Program, Statement, StatementKind};

/// Lowers statements against one credential mapping.
pub struct Lowerer<'c> {
    credentials: &'c Credentials,
}

impl<'c> Lowerer<'c> {
    pub fn new(credentials: &'c Credentials) -> Self {
        Lowerer { credentials }
    }

    pub fn lower_program(&self, program: &Program) -> LoweredProgram {
        let operations = self.lower_block(&program.statements);
        tracing::debug!(
            statements = program.statements.len(),
            operations = operations.len(),
            "lowering complete"
        );
        LoweredProgram::new(operations)
    }

    pub fn lower_block(&self, statements: &[Statement]) -> Vec<Operation> {
        statements
            .iter()
            .flat_map(|statement| self.lower_statement(statement))
            .collect()
    }

    /// The fragment for a single statement.
    pub fn lower_statement(&self, statement: &Statement) -> Vec<Operation> {
        match &statement.kind {
            StatementKind::Storage(directive) => vec![storage::lower(directive)],
            StatementKind::Grow(grow) => growth::lower(grow),
            StatementKind::Fetch(fetch) => vec![fetch::lower(self, fetch)],
            StatementKind::Emit(emission) => vec![emit::lower(emission)],
            StatementKind::Raw(text) => vec![Operation::Raw {
                text: text.clone(),
                line: statement.line,
            }],
        }
    }
}
