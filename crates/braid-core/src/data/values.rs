use derive_more::From;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/// A single value within a row
#[derive(Clone, Deserialize, Serialize, From)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl Value {
    /// If this is an int value, returns as an int
    pub fn int_value(&self) -> Option<i64> {
        if let Self::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// If this is a string value, returns as a str
    pub fn str_value(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl AsRef<Value> for Value {
    fn as_ref(&self) -> &Value {
        self
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::from(value.to_string())
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => {
                write!(f, "{s}")
            }
            Value::Integer(i) => {
                write!(f, "{i}")
            }
            Value::Float(fl) => {
                write!(f, "{fl}")
            }
            Value::Boolean(b) => {
                write!(f, "{b}")
            }
            Value::Null => {
                write!(f, "null")
            }
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => {
                write!(f, "{s:?}")
            }
            Value::Integer(i) => {
                write!(f, "{i}_i64")
            }
            Value::Float(fl) => {
                write!(f, "{fl}_f64")
            }
            Value::Boolean(b) => {
                write!(f, "{b}")
            }
            Value::Null => {
                write!(f, "null")
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (String(l), String(r)) => l == r,
            (Integer(l), Integer(r)) => l == r,
            (Float(l), Float(r)) => l.total_cmp(r).is_eq(),
            (Boolean(l), Boolean(r)) => l == r,
            (Null, Null) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use Value::*;
        Some(match (self, other) {
            (String(l), String(r)) => l.cmp(r),
            (Integer(l), Integer(r)) => l.cmp(r),
            (Float(l), Float(r)) => l.total_cmp(r),
            (Boolean(l), Boolean(r)) => l.cmp(r),
            (Null, Null) => Ordering::Equal,
            (_, Null) => Ordering::Greater,
            (Null, _) => Ordering::Less,
            _ => return None,
        })
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => u64::from_be_bytes(f.to_be_bytes()).hash(state),
            Value::Boolean(b) => b.hash(state),
            Value::Null => ().hash(state),
        }
    }
}
