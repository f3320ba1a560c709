//! Type system definitions for the AST.
//!
//! This module defines the types of the language:
//!
//! - Primitive types (`Void`, `Bool`, `Int32`, `Float32`)
//! - Placeholders resolved by the type checker (`Deduced`, `Unspecified`)
//! - Named, function and pointer types
//! - The mutability qualifier, which belongs to a binding and not to a type
//!
//! Types in the AST start as written in the source and are refined in place
//! by the type checker into concrete types.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Void,
    Bool,
    Int32,
    Float32,
    /// Written as `_` or introduced by `:=`; replaced by the initializer's type.
    Deduced,
    /// Accepts anything; only used for the builtin `print`.
    Unspecified,
    UserDefined(String),
    Function(FunctionType),
    Pointer(Box<Type>),
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int32 | Type::Float32)
    }

    /// Whether the type still has to be resolved by the type checker.
    pub fn is_placeholder(&self) -> bool {
        match self {
            Type::Deduced | Type::Unspecified => true,
            Type::Function(function) => {
                function.parameters.iter().any(Type::is_placeholder)
                    || function.return_type.is_placeholder()
            }
            Type::Pointer(pointee) => pointee.is_placeholder(),
            _ => false,
        }
    }

    /// Whether values of this type can exist while a program runs.
    pub fn has_runtime_value(&self) -> bool {
        matches!(self, Type::Int32 | Type::Float32 | Type::Bool) || *self == Type::string()
    }

    /// The type given to string literals.
    pub fn string() -> Type {
        Type::Pointer(Box::new(Type::UserDefined(String::from("Char"))))
    }

    /// Maps a type name as written in the source onto a type.
    pub fn from_name(name: &str) -> Type {
        match name {
            "Int32" => Type::Int32,
            "Float32" => Type::Float32,
            "Bool" => Type::Bool,
            "void" | "Void" => Type::Void,
            _ => Type::UserDefined(name.to_string()),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Bool => write!(f, "Bool"),
            Type::Int32 => write!(f, "Int32"),
            Type::Float32 => write!(f, "Float32"),
            Type::Deduced => write!(f, "_"),
            Type::Unspecified => write!(f, "?"),
            Type::UserDefined(name) => write!(f, "{}", name),
            Type::Function(function) => write!(f, "{}", function),
            Type::Pointer(pointee) => write!(f, "*{}", pointee),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub parameters: Vec<Type>,
    pub return_type: Box<Type>,
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({}) -> {}", parameters, self.return_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Qualifier {
    #[default]
    None,
    Mutable,
}

/// A type together with the qualifier of the binding it is attached to.
///
/// Two bindings have the same type when their `ty` fields are equal; the
/// qualifier never takes part in type comparisons.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedType {
    pub ty: Type,
    pub qualifier: Qualifier,
}

impl QualifiedType {
    pub fn new(ty: Type, qualifier: Qualifier) -> Self {
        QualifiedType { ty, qualifier }
    }

    pub fn is_mutable(&self) -> bool {
        self.qualifier == Qualifier::Mutable
    }
}

impl Display for QualifiedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.qualifier {
            Qualifier::None => write!(f, "{}", self.ty),
            Qualifier::Mutable => write!(f, "mutable {}", self.ty),
        }
    }
}
