use std::{fmt::Display, str::FromStr};

use thiserror::Error;

use crate::ast::types::Type;

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Float32(f32),
    Bool(bool),
    /// The value of a string literal, typed `*Char`.
    Str(String),
    /// The result of a `void` function.
    Void,
}

impl Value {
    pub fn get_type(&self) -> Type {
        match self {
            Value::Int32(_) => Type::Int32,
            Value::Float32(_) => Type::Float32,
            Value::Bool(_) => Type::Bool,
            Value::Str(_) => Type::string(),
            Value::Void => Type::Void,
        }
    }

    /// The value a variable defined without an initializer starts with.
    ///
    /// Returns `None` exactly when `ty.has_runtime_value()` is false.
    pub fn zero(ty: &Type) -> Option<Value> {
        match ty {
            Type::Int32 => Some(Value::Int32(0)),
            Type::Float32 => Some(Value::Float32(0.0)),
            Type::Bool => Some(Value::Bool(false)),
            ty if *ty == Type::string() => Some(Value::Str(String::new())),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int32(value) => write!(f, "{}", value),
            Value::Float32(value) => write!(f, "{:?}", value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Str(value) => write!(f, "{}", value),
            Value::Void => write!(f, "void"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot read {input:?} as a value, expected an integer, a decimal number, `true` or `false`")]
pub struct ParseValueError {
    input: String,
}

/// Reads a value given on the command line.
///
/// `42` is an `Int32`, `4.5` a `Float32`, `true`/`false` a `Bool`. A value
/// wrapped in double quotes is a string.
impl FromStr for Value {
    type Err = ParseValueError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();

        if let Some(text) = trimmed
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            return Ok(Value::Str(text.to_string()));
        }

        match trimmed {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }

        if let Ok(value) = trimmed.parse::<i32>() {
            return Ok(Value::Int32(value));
        }

        if trimmed.contains('.') {
            if let Ok(value) = trimmed.parse::<f32>() {
                if value.is_finite() {
                    return Ok(Value::Float32(value));
                }
            }
        }

        Err(ParseValueError {
            input: input.to_string(),
        })
    }
}
