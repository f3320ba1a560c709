/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Statement and expression enums, and the `Program` root
/// - expressions: Definitions for the expression kinds
/// - statements: Definitions for the statement kinds and function definitions
/// - types: Definitions for type representations in the AST
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
