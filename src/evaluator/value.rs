use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Null,
  Bool(bool),
  Int(i64),
  Float(f64),
  Str(String),
  List(Vec<Value>),
  Map(IndexMap<String, Value>),
}

impl Value {
  pub fn str(value: impl Into<String>) -> Self {
    Value::Str(value.into())
  }

  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Bool(_) => "bool",
      Value::Int(_) => "int",
      Value::Float(_) => "float",
      Value::Str(_) => "str",
      Value::List(_) => "list",
      Value::Map(_) => "map",
    }
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  pub fn as_list(&self) -> Option<&[Value]> {
    match self {
      Value::List(items) => Some(items),
      _ => None,
    }
  }
}

impl From<serde_json::Value> for Value {
  fn from(json: serde_json::Value) -> Self {
    match json {
      serde_json::Value::Null => Value::Null,
      serde_json::Value::Bool(b) => Value::Bool(b),
      serde_json::Value::Number(n) => match n.as_i64() {
        Some(i) => Value::Int(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
      },
      serde_json::Value::String(s) => Value::Str(s),
      serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
      serde_json::Value::Object(fields) => Value::Map(
        fields
          .into_iter()
          .map(|(k, v)| (k, Value::from(v)))
          .collect(),
      ),
    }
  }
}

impl From<i64> for Value {
  fn from(n: i64) -> Self {
    Value::Int(n)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::Str(s.to_string())
  }
}

/// Top-level strings print bare; nested ones are quoted.
impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Value::Str(s) => write!(f, "{}", s),
      other => write_nested(f, other),
    }
  }
}

fn write_nested(f: &mut fmt::Formatter, value: &Value) -> fmt::Result {
  match value {
    Value::Null => write!(f, "null"),
    Value::Bool(b) => write!(f, "{}", b),
    Value::Int(n) => write!(f, "{}", n),
    Value::Float(n) => write!(f, "{:?}", n),
    Value::Str(s) => write!(f, "{:?}", s),
    Value::List(items) => {
      write!(f, "[")?;
      for (i, item) in items.iter().enumerate() {
        if i > 0 {
          write!(f, ", ")?;
        }
        write_nested(f, item)?;
      }
      write!(f, "]")
    }
    Value::Map(map) => {
      write!(f, "{{")?;
      for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
          write!(f, ", ")?;
        }
        write!(f, "{:?}: ", k)?;
        write_nested(f, v)?;
      }
      write!(f, "}}")
    }
  }
}
