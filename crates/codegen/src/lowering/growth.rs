//! `grow` lowers to a seed assignment followed by an append loop over the
//! same name, so the bound value is the final sequence.

use crate::ops::{Operation, Step};
use solas_parser::ast::{Expr, GrowStatement, StepSpec};

pub(super) fn lower(grow: &GrowStatement) -> Vec<Operation> {
    let step = match &grow.step {
        StepSpec::SumLastTwo => Step::SumLastTwo,
        StepSpec::Expr(expr) => Step::Expr(expr.clone()),
        StepSpec::Opaque(text) => {
            tracing::debug!(sequence = %grow.target, step = %text, "step kept as opaque fragment");
            Step::Opaque(text.clone())
        }
    };

    vec![
        Operation::Assign {
            target: grow.target.clone(),
            value: Expr::List(grow.seed.clone()),
        },
        Operation::Loop {
            sequence: grow.target.clone(),
            times: grow.limit,
            step,
        },
    ]
}
