//! Cell values before and after reconciliation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dataset cell as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value
    Null,
    /// Boolean flag
    Bool(bool),
    /// Integer
    Integer(i64),
    /// Floating point number; NaN counts as missing
    Float(f64),
    /// Text
    Text(String),
}

impl Value {
    /// Returns true for `Null` and NaN floats.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Returns the value as an integer if it holds a whole number.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Plain string form without SQL quoting.
    pub fn to_plain_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// A reconciled cell, ready to be written into an `INSERT` value tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    /// The `NULL` keyword
    Null,
    /// Numeric literal, written bare
    Number(String),
    /// String literal, written single-quoted
    Text(String),
}

impl Literal {
    /// Integer literal.
    pub fn integer(value: i64) -> Self {
        Literal::Number(value.to_string())
    }

    /// Returns true for the `NULL` keyword.
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Returns the unquoted text of a string literal.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        if value.is_missing() {
            return Literal::Null;
        }
        match value {
            Value::Text(s) => Literal::Text(s),
            other => Literal::Number(other.to_plain_string()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("NULL"),
            Literal::Number(n) => f.write_str(n),
            Literal::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}
