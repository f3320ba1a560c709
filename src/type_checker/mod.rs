//! Type checking and semantic analysis module.
//!
//! This module performs semantic analysis on the parsed `Program`:
//!
//! - Building the scope tree (global scope, one scope per function, one per
//!   non-empty nested block)
//! - Resolving variable and function references
//! - Inferring deduced variable types and writing them back into the AST
//! - Checking operator operands, call signatures, returns and assignments
//!
//! A program that passes is wrapped in a `CheckedProgram`, the only input
//! the interpreter accepts.

pub mod scope;
pub mod type_checker;
