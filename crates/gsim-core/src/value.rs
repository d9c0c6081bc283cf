//! The open, tagged value type used for agent `meta`/`state` extension
//! fields and custom sensor payloads: a closed enum covering the common
//! scalar shapes, kept open-ended enough for user extensions by pattern-
//! matching on well-known keys and carrying the rest unexamined.
//!
//! Well-known state fields (`curr_pos`, `sensor`, `action`) get their own
//! strongly typed struct fields in `gsim-agent::State` instead of living in
//! here — `Value` is only for the caller-extensible remainder.

use indexmap::IndexMap;

// Deliberately *not* `#[serde(untagged)]`: untagged enums deserialize via
// `deserialize_any`, which non-self-describing formats like `bincode` (the
// recorder's wire format, see `gsim-record::file`) don't support. The
// default externally-tagged representation round-trips through bincode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }
}
