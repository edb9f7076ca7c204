//! Reference execution context for lowered programs.
//!
//! Walks a [`LoweredProgram`] against an explicit [`ExecutionContext`]
//! holding the namespace, the persistence map and the drift reports of one
//! run. Network access goes through a [`Transport`]; emitted text goes to any
//! `Write` sink.

pub mod builtins;
pub mod value;

use crate::error::{ExecError, ExecResult};
use crate::transport::Transport;
use indexmap::IndexMap;
use solas_codegen::{
  Accessor, FetchIntent, LoweredProgram, Operation, Output, Placeholder, RetryPolicy, Segment, Step,
  Template,
};
use solas_parser::ast::{Expr, Number};
use std::io::Write;
use value::Value;

/// Prefix of the report written when every attempt of a fetch failed.
pub const DRIFT_PREFIX: &str = "Drifting from error: ";

/// State of one program run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
  namespace: IndexMap<String, Value>,
  store: IndexMap<String, Value>,
  drifts: Vec<String>,
}

impl ExecutionContext {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.namespace.get(name)
  }

  pub fn set(&mut self, name: impl Into<String>, value: Value) {
    self.namespace.insert(name.into(), value);
  }

  /// The persistence map.
  pub fn store(&self) -> &IndexMap<String, Value> {
    &self.store
  }

  /// Causes of terminal fetch failures, in order.
  pub fn drifts(&self) -> &[String] {
    &self.drifts
  }
}

pub struct Evaluator<T: Transport, W: Write> {
  context: ExecutionContext,
  transport: T,
  out: W,
}

impl<T: Transport, W: Write> Evaluator<T, W> {
  pub fn new(transport: T, out: W) -> Self {
    Self::with_context(ExecutionContext::new(), transport, out)
  }

  /// Continue from an existing context, e.g. to keep a persistence map
  /// across runs.
  pub fn with_context(context: ExecutionContext, transport: T, out: W) -> Self {
    Self {
      context,
      transport,
      out,
    }
  }

  pub fn context(&self) -> &ExecutionContext {
    &self.context
  }

  pub fn into_context(self) -> ExecutionContext {
    self.context
  }

  pub fn execute(&mut self, program: &LoweredProgram) -> ExecResult<()> {
    self.exec_block(program.operations())?;
    self.out.flush()?;
    Ok(())
  }

  fn exec_block(&mut self, ops: &[Operation]) -> ExecResult<()> {
    for op in ops {
      self.exec(op)?;
    }
    Ok(())
  }

  fn exec(&mut self, op: &Operation) -> ExecResult<()> {
    tracing::trace!(operation = op.name(), "executing");
    match op {
      Operation::Assign { target, value } => {
        let value = self.eval(value, None)?;
        self.context.set(target.clone(), value);
      }
      Operation::Loop {
        sequence,
        times,
        step,
      } => self.exec_loop(sequence, *times, step)?,
      Operation::HttpFetch {
        target,
        url,
        policy,
        body,
      } => self.exec_fetch(target, url, policy, body)?,
      Operation::MapPut { key, value } => {
        let value = self.eval(value, None)?;
        self.context.store.insert(key.clone(), value);
      }
      Operation::MapGet { key, target } => {
        let value = self.context.store.get(key).cloned().unwrap_or(Value::Null);
        self.context.set(target.clone(), value);
      }
      Operation::Print(output) => {
        let text = match output {
          Output::Template(template) => self.render(template)?,
          Output::Value(expr) => self.eval(expr, None)?.to_string(),
        };
        writeln!(self.out, "{}", text)?;
      }
      Operation::Raw { text, line } => {
        return Err(ExecError::Unsupported {
          line: *line,
          text: text.clone(),
        })
      }
    }
    Ok(())
  }

  /// The list bound to `sequence` grows in place, so a step that names the
  /// sequence sees every element appended so far.
  fn exec_loop(&mut self, sequence: &str, times: u64, step: &Step) -> ExecResult<()> {
    for _ in 0..times {
      let items = self.sequence(sequence)?;
      let next = match step {
        Step::SumLastTwo => builtins::sum(&items[items.len().saturating_sub(2)..])?,
        Step::Expr(expr) => self.eval(expr, Some(items))?,
        Step::Opaque(text) => return Err(ExecError::UnsupportedStep(text.clone())),
      };
      if let Some(Value::List(items)) = self.context.namespace.get_mut(sequence) {
        items.push(next);
      }
    }
    Ok(())
  }

  fn sequence(&self, name: &str) -> ExecResult<&[Value]> {
    let value = self.lookup(name)?;
    value.as_list().ok_or(ExecError::TypeMismatch {
      expected: "list",
      found: value.type_name(),
    })
  }

  /// Attempts run back to back. A transport failure or an error in the body
  /// fails the attempt; when the last attempt fails a drift report is written
  /// and the run continues. Output errors are never retried.
  fn exec_fetch(
    &mut self,
    target: &str,
    url: &str,
    policy: &RetryPolicy,
    body: &[Operation],
  ) -> ExecResult<()> {
    let intent = policy.intent(url);
    let attempts = policy.attempts();

    for attempt in 1..=attempts {
      match self.attempt_fetch(target, &intent, body) {
        Ok(()) => {
          tracing::debug!(url, attempt, "fetch succeeded");
          return Ok(());
        }
        Err(err @ ExecError::Io(_)) => return Err(err),
        Err(err) if attempt < attempts => {
          tracing::warn!(url, attempt, attempts, error = %err, "fetch attempt failed, retrying");
        }
        Err(err) => {
          let cause = err.to_string();
          tracing::warn!(url, attempts, error = %cause, "all fetch attempts failed");
          writeln!(self.out, "{}{}", DRIFT_PREFIX, cause)?;
          self.context.drifts.push(cause);
        }
      }
    }
    Ok(())
  }

  fn attempt_fetch(
    &mut self,
    target: &str,
    intent: &FetchIntent,
    body: &[Operation],
  ) -> ExecResult<()> {
    let response = self.transport.get(intent)?;
    self.context.set(target, Value::from(response));
    self.exec_block(body)
  }

  fn eval(&self, expr: &Expr, sequence: Option<&[Value]>) -> ExecResult<Value> {
    match expr {
      Expr::Str(s) => Ok(Value::Str(s.clone())),
      Expr::Number(Number::Int(n)) => Ok(Value::Int(*n)),
      Expr::Number(Number::Float(n)) => Ok(Value::Float(*n)),
      Expr::Ident(name) => self.lookup(name).cloned(),
      Expr::Resource { .. } => Err(ExecError::Resource(expr.to_string())),
      Expr::List(items) => items
        .iter()
        .map(|item| self.eval(item, sequence))
        .collect::<ExecResult<Vec<_>>>()
        .map(Value::List),
      Expr::Field { base, field } => {
        let base = self.eval(base, sequence)?;
        field_of(base, field)
      }
      Expr::Index { base, index } => {
        let base = self.eval(base, sequence)?;
        match self.eval(index, sequence)? {
          Value::Int(i) => index_of(base, i),
          Value::Str(key) => key_of(base, &key),
          other => Err(ExecError::TypeMismatch {
            expected: "int or str",
            found: other.type_name(),
          }),
        }
      }
      Expr::Call { callee, args } => {
        let args = args
          .iter()
          .map(|arg| self.eval(arg, sequence))
          .collect::<ExecResult<Vec<_>>>()?;
        builtins::call(callee, &args, sequence)
      }
    }
  }

  fn lookup(&self, name: &str) -> ExecResult<&Value> {
    self
      .context
      .get(name)
      .ok_or_else(|| ExecError::UndefinedName(name.to_string()))
  }

  fn render(&self, template: &Template) -> ExecResult<String> {
    let mut text = String::new();
    for segment in template.segments() {
      match segment {
        Segment::Literal(literal) => text.push_str(literal),
        Segment::Placeholder(placeholder) => {
          text.push_str(&self.resolve(placeholder)?.to_string());
        }
      }
    }
    Ok(text)
  }

  fn resolve(&self, placeholder: &Placeholder) -> ExecResult<Value> {
    let mut value = self.lookup(&placeholder.root)?.clone();
    for accessor in &placeholder.path {
      value = match accessor {
        Accessor::Field(name) => field_of(value, name)?,
        Accessor::Key(key) => key_of(value, key)?,
        Accessor::Index(i) => index_of(value, *i)?,
      };
    }
    Ok(value)
  }
}

/// `value.name`: a map field, or a reducer applied to a list.
fn field_of(value: Value, name: &str) -> ExecResult<Value> {
  match value {
    Value::Map(_) => key_of(value, name),
    Value::List(items) if builtins::is_reducer(name) => builtins::reduce(name, &items),
    other => Err(ExecError::TypeMismatch {
      expected: "map",
      found: other.type_name(),
    }),
  }
}

fn key_of(value: Value, key: &str) -> ExecResult<Value> {
  match value {
    Value::Map(mut map) => map
      .swap_remove(key)
      .ok_or_else(|| ExecError::KeyNotFound(key.to_string())),
    other => Err(ExecError::TypeMismatch {
      expected: "map",
      found: other.type_name(),
    }),
  }
}

/// Negative indices count from the end.
fn index_of(value: Value, index: i64) -> ExecResult<Value> {
  match value {
    Value::List(mut items) => {
      let len = items.len();
      let position = if index < 0 {
        i64::try_from(len).ok().and_then(|len| len.checked_add(index))
      } else {
        Some(index)
      };
      match position.and_then(|p| usize::try_from(p).ok()) {
        Some(p) if p < len => Ok(items.swap_remove(p)),
        _ => Err(ExecError::IndexOutOfRange { index, len }),
      }
    }
    other => Err(ExecError::TypeMismatch {
      expected: "list",
      found: other.type_name(),
    }),
  }
}
