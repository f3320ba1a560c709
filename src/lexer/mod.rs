//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using start-anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking (line and column) for error reporting
//! - Line comments and arbitrarily nested block comments

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
