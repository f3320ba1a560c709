//! The static scope tree built by the type checker.
//!
//! Scopes live in one growable vector and refer to their parents by index,
//! so a `ScopeId` stays valid while the tree grows. Index 0 is a sentinel
//! meaning "no scope", index 1 is the global scope.

use crate::{
    ast::types::{Qualifier, Type},
    errors::errors::{Error, ErrorImpl},
    Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(0);
    pub const GLOBAL: ScopeId = ScopeId(1);

    pub fn is_none(&self) -> bool {
        *self == ScopeId::NONE
    }

    fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub ty: Type,
    pub qualifier: Qualifier,
}

impl Binding {
    pub fn is_mutable(&self) -> bool {
        self.qualifier == Qualifier::Mutable
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexicalScope {
    pub parent: ScopeId,
    /// Bindings declared directly in this scope, in declaration order.
    pub bindings: Vec<Binding>,
    /// Set on function body scopes only.
    pub return_type: Option<Type>,
}

impl LexicalScope {
    fn new(parent: ScopeId, return_type: Option<Type>) -> Self {
        LexicalScope {
            parent,
            bindings: vec![],
            return_type,
        }
    }

    pub fn get_binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|binding| binding.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeTree {
    scopes: Vec<LexicalScope>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// Creates a tree holding the sentinel and the global scope.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![
                LexicalScope::new(ScopeId::NONE, None),
                LexicalScope::new(ScopeId::NONE, None),
            ],
        }
    }

    pub fn add_scope(&mut self, parent: ScopeId, return_type: Option<Type>) -> ScopeId {
        self.scopes.push(LexicalScope::new(parent, return_type));
        ScopeId((self.scopes.len() - 1) as u32)
    }

    pub fn get(&self, id: ScopeId) -> Option<&LexicalScope> {
        if id.is_none() {
            None
        } else {
            self.scopes.get(id.index())
        }
    }

    /// Number of real scopes, the sentinel excluded.
    pub fn len(&self) -> usize {
        self.scopes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a binding to `id`. Names must be unique within one scope;
    /// shadowing a binding of an enclosing scope is fine.
    pub fn declare(
        &mut self,
        id: ScopeId,
        name: &str,
        ty: Type,
        qualifier: Qualifier,
        span: Span,
    ) -> Result<(), Error> {
        let scope = match self.scopes.get_mut(id.index()) {
            Some(scope) if !id.is_none() => scope,
            _ => {
                return Err(Error::new(
                    ErrorImpl::InternalConsistency {
                        message: format!("declaration of {:?} outside of any scope", name),
                    },
                    span,
                ))
            }
        };

        if scope.get_binding(name).is_some() {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: name.to_string(),
                },
                span,
            ));
        }

        scope.bindings.push(Binding {
            name: name.to_string(),
            ty,
            qualifier,
        });
        Ok(())
    }

    /// Finds the nearest binding for `name`, walking parent links from `id`.
    pub fn lookup(&self, id: ScopeId, name: &str) -> Option<&Binding> {
        let mut current = id;
        while let Some(scope) = self.get(current) {
            if let Some(binding) = scope.get_binding(name) {
                return Some(binding);
            }
            current = scope.parent;
        }
        None
    }

    /// The return type required by the function enclosing `id`.
    pub fn return_type(&self, id: ScopeId) -> Option<&Type> {
        let mut current = id;
        while let Some(scope) = self.get(current) {
            if let Some(return_type) = &scope.return_type {
                return Some(return_type);
            }
            current = scope.parent;
        }
        None
    }
}
