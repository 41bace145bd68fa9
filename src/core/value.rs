//! Dynamic value model for blueprint snapshots.
//!
//! Blueprint members, constructor arguments, and override payloads all travel
//! through `Value`. `Kind` is the declared-type side of the same model: member
//! and parameter descriptors carry a `Kind`, and assignability between a
//! runtime `Value` and a declared `Kind` is what drives constructor selection
//! and residual member injection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A runtime value carried by a blueprint snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

/// A declared member or parameter type.
///
/// List element types are erased: a `Kind::List` parameter accepts any
/// `Value::List`, and the descriptor's invoke function is responsible for
/// reading the elements it expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Kind {
    Bool,
    Int,
    Float,
    Str,
    List,
    Option(Box<Kind>),
}

impl Value {
    /// Whether this value can be used as-is for a slot declared as `kind`.
    ///
    /// `Null` fits only optional slots. A non-null value fits an optional
    /// slot whenever it fits the inner kind. Everything else is an exact
    /// variant match; no coercion happens here.
    pub fn is_assignable_to(&self, kind: &Kind) -> bool {
        match (self, kind) {
            (Value::Null, Kind::Option(_)) => true,
            (Value::Null, _) => false,
            (v, Kind::Option(inner)) => v.is_assignable_to(inner),
            (Value::Bool(_), Kind::Bool) => true,
            (Value::Int(_), Kind::Int) => true,
            (Value::Float(_), Kind::Float) => true,
            (Value::Str(_), Kind::Str) => true,
            (Value::List(_), Kind::List) => true,
            _ => false,
        }
    }

    /// Best-effort conversion of an override payload to a declared kind.
    ///
    /// Identity when already assignable; the single supported conversion is
    /// `Int` to `Float` widening, applied through `Option` as well. On
    /// failure the original value is handed back so the caller can report
    /// what it was.
    pub fn convert_to(self, kind: &Kind) -> std::result::Result<Value, Value> {
        if self.is_assignable_to(kind) {
            return Ok(self);
        }
        match (self, kind) {
            (Value::Int(i), Kind::Float) => Ok(Value::Float(i as f64)),
            (v, Kind::Option(inner)) => v.convert_to(inner),
            (v, _) => Err(v),
        }
    }

    /// Name of this value's runtime kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float view; integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Collect a list of strings, if that is what this value holds.
    pub fn to_string_vec(&self) -> Option<Vec<String>> {
        let items = self.as_list()?;
        items
            .iter()
            .map(|v| v.as_str().map(str::to_owned))
            .collect()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => write!(f, "bool"),
            Kind::Int => write!(f, "int"),
            Kind::Float => write!(f, "float"),
            Kind::Str => write!(f, "str"),
            Kind::List => write!(f, "list"),
            Kind::Option(inner) => write!(f, "option<{}>", inner),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
