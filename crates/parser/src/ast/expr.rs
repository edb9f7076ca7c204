//! Expressions that may appear inside statements.

use crate::lexer::Namespace;
use std::fmt;

/// A numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Parse a numeric lexeme. Integers too large for `i64` become floats.
    pub fn parse(text: &str) -> Option<Number> {
        let is_float = text.contains(['.', 'e', 'E']);
        if !is_float {
            if let Ok(value) = text.parse::<i64>() {
                return Some(Number::Int(value));
            }
        }
        text.parse::<f64>().ok().map(Number::Float)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{:?}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Number(Number),
    Ident(String),
    /// `@data.archive`
    Resource {
        namespace: Namespace,
        path: Vec<String>,
    },
    List(Vec<Expr>),
    /// `base.field`
    Field {
        base: Box<Expr>,
        field: String,
    },
    /// `base[index]`
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    /// `callee(args)`
    Call {
        callee: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Number(Number::Int(value))
    }

    pub fn field(base: Expr, field: impl Into<String>) -> Self {
        Expr::Field {
            base: Box::new(base),
            field: field.into(),
        }
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: callee.into(),
            args,
        }
    }

    /// The built-in "sum of the last two elements" reducer, `tail(2).sum`.
    pub fn is_sum_of_last_two(&self) -> bool {
        match self {
            Expr::Field { base, field } if field == "sum" => matches!(
                base.as_ref(),
                Expr::Call { callee, args }
                    if callee == "tail" && args.as_slice() == [Expr::int(2)]
            ),
            _ => false,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Str(value) => write!(f, "\"{}\"", value),
            Expr::Number(number) => write!(f, "{}", number),
            Expr::Ident(name) => write!(f, "{}", name),
            Expr::Resource { namespace, path } => {
                write!(f, "@{}", namespace.as_str())?;
                for segment in path {
                    write!(f, ".{}", segment)?;
                }
                Ok(())
            }
            Expr::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Expr::Field { base, field } => write!(f, "{}.{}", base, field),
            Expr::Index { base, index } => write!(f, "{}[{}]", base, index),
            Expr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
