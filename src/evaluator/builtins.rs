//! Functions and list reducers available to step expressions and emitted
//! values.

use super::value::Value;
use crate::error::{ExecError, ExecResult};
use std::cmp::Ordering;

/// Field names that reduce a list: `xs.sum`, `tail(2).max`.
pub const REDUCERS: [&str; 6] = ["sum", "max", "min", "len", "first", "last"];

pub fn is_reducer(name: &str) -> bool {
  REDUCERS.contains(&name)
}

pub fn reduce(name: &str, items: &[Value]) -> ExecResult<Value> {
  match name {
    "sum" => sum(items),
    "max" => extreme(items, Ordering::Greater),
    "min" => extreme(items, Ordering::Less),
    "len" => i64::try_from(items.len())
      .map(Value::Int)
      .map_err(|_| ExecError::Overflow("len")),
    "first" => Ok(items.first().cloned().unwrap_or(Value::Null)),
    "last" => Ok(items.last().cloned().unwrap_or(Value::Null)),
    other => Err(ExecError::UnknownFunction(other.to_string())),
  }
}

/// Call a named function. `sequence` is the list being grown when called from
/// a growth step; `tail` is only defined there.
pub fn call(name: &str, args: &[Value], sequence: Option<&[Value]>) -> ExecResult<Value> {
  match name {
    "tail" => {
      let items = sequence.ok_or_else(|| invalid(name, "only available in a growth step"))?;
      match args {
        [count] => tail(items, count),
        _ => Err(invalid(name, "expects one argument")),
      }
    }
    _ if is_reducer(name) => match args {
      [Value::List(items)] => reduce(name, items),
      [other] => Err(ExecError::TypeMismatch {
        expected: "list",
        found: other.type_name(),
      }),
      _ => Err(invalid(name, "expects one argument")),
    },
    _ => Err(ExecError::UnknownFunction(name.to_string())),
  }
}

/// The last `count` elements, fewer when the list is shorter.
pub fn tail(items: &[Value], count: &Value) -> ExecResult<Value> {
  let count = match count {
    Value::Int(n) if *n >= 0 => usize::try_from(*n).unwrap_or(usize::MAX),
    Value::Int(_) => return Err(invalid("tail", "count must not be negative")),
    other => {
      return Err(ExecError::TypeMismatch {
        expected: "int",
        found: other.type_name(),
      })
    }
  };
  let start = items.len().saturating_sub(count);
  Ok(Value::List(items[start..].to_vec()))
}

/// Sum of all elements; 0 for an empty list.
pub fn sum(items: &[Value]) -> ExecResult<Value> {
  items.iter().try_fold(Value::Int(0), |total, item| add(&total, item))
}

pub fn add(lhs: &Value, rhs: &Value) -> ExecResult<Value> {
  match (lhs, rhs) {
    (Value::Int(a), Value::Int(b)) => a
      .checked_add(*b)
      .map(Value::Int)
      .ok_or(ExecError::Overflow("sum")),
    (Value::Int(a), Value::Float(b)) => Ok(Value::Float(*a as f64 + b)),
    (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a + *b as f64)),
    (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
    (Value::Int(_) | Value::Float(_), other) | (other, _) => Err(ExecError::TypeMismatch {
      expected: "number",
      found: other.type_name(),
    }),
  }
}

fn compare(lhs: &Value, rhs: &Value) -> ExecResult<Ordering> {
  let as_float = |value: &Value| match value {
    Value::Int(n) => Ok(*n as f64),
    Value::Float(n) => Ok(*n),
    other => Err(ExecError::TypeMismatch {
      expected: "number",
      found: other.type_name(),
    }),
  };
  let (a, b) = (as_float(lhs)?, as_float(rhs)?);
  Ok(a.partial_cmp(&b).unwrap_or(Ordering::Equal))
}

/// Largest (`Greater`) or smallest (`Less`) element; null when empty.
fn extreme(items: &[Value], want: Ordering) -> ExecResult<Value> {
  let Some((first, rest)) = items.split_first() else {
    return Ok(Value::Null);
  };
  compare(first, first)?;
  let mut best = first;
  for item in rest {
    if compare(item, best)? == want {
      best = item;
    }
  }
  Ok(best.clone())
}

fn invalid(name: &str, reason: &str) -> ExecError {
  ExecError::InvalidCall {
    name: name.to_string(),
    reason: reason.to_string(),
  }
}
