//! Tree-walking interpreter module.
//!
//! This module executes a `CheckedProgram` directly from its AST. It handles:
//!
//! - A runtime frame stack, separate from the static scope tree
//! - Evaluation of expressions and execution of statements
//! - Early exit from functions through an explicit `Flow` signal
//! - The `print` builtin, written to an `OutputSink`
//!
//! Failures are reported as `RunError`, split into problems found before
//! the program started and faults found while it ran.

pub mod builtins;
pub mod expr;
pub mod frames;
pub mod interpreter;
pub mod stmt;
pub mod value;
