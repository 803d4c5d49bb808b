//! The value algebra shared by the parser and the printers.

use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use ordered_float::NotNan;
use std::fmt;

use crate::location::{Diagnostic, Location, Stage};

pub type Object = IndexMap<String, Value>;
pub type Constants = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(BigInt),
    Float(NotNan<f64>),
    Bool(bool),
    Null,
    List(Vec<Value>),
    Object(Object),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Int,
    Float,
    Bool,
    Null,
    List,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Null => "null",
            Kind::List => "list",
            Kind::Object => "object",
        };
        write!(f, "{name}")
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::Null => Kind::Null,
            Value::List(_) => Kind::List,
            Value::Object(_) => Kind::Object,
        }
    }

    fn wrong_type(&self, wanted: Kind, loc: Location) -> Diagnostic {
        Diagnostic::new(
            Stage::Parser,
            String::new(),
            loc,
            format!("wrong type: expected {wanted}, found {}", self.kind()),
        )
    }

    pub fn as_string(&self, loc: Location) -> Result<&str, Diagnostic> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.wrong_type(Kind::String, loc)),
        }
    }

    /// Lossless toward float, truncated toward int.
    pub fn as_int(&self, loc: Location) -> Result<BigInt, Diagnostic> {
        match self {
            Value::Int(i) => Ok(i.clone()),
            Value::Float(f) => BigInt::from_f64(f.into_inner().trunc()).ok_or_else(|| self.wrong_type(Kind::Int, loc)),
            _ => Err(self.wrong_type(Kind::Int, loc)),
        }
    }

    pub fn as_float(&self, loc: Location) -> Result<f64, Diagnostic> {
        match self {
            Value::Float(f) => Ok(f.into_inner()),
            Value::Int(i) => i.to_f64().ok_or_else(|| self.wrong_type(Kind::Float, loc)),
            _ => Err(self.wrong_type(Kind::Float, loc)),
        }
    }

    pub fn as_bool(&self, loc: Location) -> Result<bool, Diagnostic> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.wrong_type(Kind::Bool, loc)),
        }
    }

    pub fn as_list(&self, loc: Location) -> Result<&[Value], Diagnostic> {
        match self {
            Value::List(l) => Ok(l),
            _ => Err(self.wrong_type(Kind::List, loc)),
        }
    }

    pub fn as_object(&self, loc: Location) -> Result<&Object, Diagnostic> {
        match self {
            Value::Object(o) => Ok(o),
            _ => Err(self.wrong_type(Kind::Object, loc)),
        }
    }
}
