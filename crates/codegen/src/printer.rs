//! Human-readable listing of a lowered program.
//!
//! One operation per line; fetch headers and bodies are indented under their
//! fetch. Authorization secrets are masked.

use crate::ops::{AUTHORIZATION_HEADER, LoweredProgram, Operation, Output, Step};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

impl fmt::Display for LoweredProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, self.operations(), 0)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_operation(f, self, 0)
    }
}

fn write_block(f: &mut impl Write, ops: &[Operation], depth: usize) -> fmt::Result {
    for op in ops {
        write_operation(f, op, depth)?;
    }
    Ok(())
}

fn write_operation(f: &mut impl Write, op: &Operation, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);

    match op {
        Operation::Assign { target, value } => writeln!(f, "{}{} = {}", pad, target, value),
        Operation::Loop {
            sequence,
            times,
            step,
        } => {
            write!(f, "{}repeat {}: {}.append(", pad, times, sequence)?;
            match step {
                Step::SumLastTwo => write!(f, "sum of last two")?,
                Step::Expr(expr) => write!(f, "{}", expr)?,
                Step::Opaque(text) => write!(f, "opaque `{}`", text)?,
            }
            writeln!(f, ")")
        }
        Operation::HttpFetch {
            target,
            url,
            policy,
            body,
        } => {
            writeln!(
                f,
                "{}{} = fetch GET \"{}\" (attempts: {})",
                pad,
                target,
                url,
                policy.attempts()
            )?;
            for (name, value) in &policy.headers {
                writeln!(f, "{}{}header {}: {}", pad, INDENT, name, masked(name, value))?;
            }
            if !body.is_empty() {
                writeln!(f, "{}{}on success:", pad, INDENT)?;
                write_block(f, body, depth + 2)?;
            }
            Ok(())
        }
        Operation::MapPut { key, value } => writeln!(f, "{}store[{}] = {}", pad, key, value),
        Operation::MapGet { key, target } => {
            writeln!(f, "{}{} = store[{}] (default null)", pad, target, key)
        }
        Operation::Print(Output::Template(template)) => {
            writeln!(f, "{}print \"{}\"", pad, template)
        }
        Operation::Print(Output::Value(expr)) => writeln!(f, "{}print {}", pad, expr),
        Operation::Raw { text, line } => writeln!(f, "{}raw (line {}): {}", pad, line, text),
    }
}

/// Keep the scheme of an authorization value, hide the secret.
fn masked<'a>(name: &str, value: &'a str) -> std::borrow::Cow<'a, str> {
    if !name.eq_ignore_ascii_case(AUTHORIZATION_HEADER) {
        return value.into();
    }
    match value.split_once(' ') {
        Some((scheme, _)) => format!("{} ****", scheme).into(),
        None => "****".into(),
    }
}
