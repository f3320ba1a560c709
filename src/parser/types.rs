//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Named types (`Int32`, `Float32`, `Bool`, `void`, user names)
//! - Pointer types (`*T`)
//! - The deduced placeholder `_`
//!
//! Similar to expression parsing, it dispatches on the first token through
//! a NUD lookup table. Qualifiers (`mutable`) belong to bindings and are
//! parsed by the statement parser, not here.

use std::collections::HashMap;

use crate::{ast::types::Type, errors::errors::Error, lexer::tokens::TokenKind};

use super::parser::Parser;

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser<'_>) -> Result<Type, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser<'_>) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_nud(TokenKind::Star, parse_pointer_type);
    parser.type_nud(TokenKind::Underscore, parse_deduced_type);
}

pub fn parse_symbol_type(parser: &mut Parser<'_>) -> Result<Type, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(Type::from_name(token.value))
}

pub fn parse_pointer_type(parser: &mut Parser<'_>) -> Result<Type, Error> {
    parser.expect(TokenKind::Star)?;
    Ok(Type::Pointer(Box::new(parse_type(parser)?)))
}

pub fn parse_deduced_type(parser: &mut Parser<'_>) -> Result<Type, Error> {
    parser.expect(TokenKind::Underscore)?;
    Ok(Type::Deduced)
}

pub fn parse_type(parser: &mut Parser<'_>) -> Result<Type, Error> {
    let token_kind = parser.current_token_kind();
    match parser.get_type_nud_lookup().get(&token_kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected_detailed("expected a type")),
    }
}

/// Parses a type that must be written out, rejecting `_`.
pub fn parse_explicit_type(parser: &mut Parser<'_>, message: &str) -> Result<Type, Error> {
    if parser.current_token_kind() == TokenKind::Underscore {
        return Err(parser.unexpected_detailed(message));
    }

    let ty = parse_type(parser)?;
    if ty.is_placeholder() {
        return Err(parser.unexpected_detailed(message));
    }
    Ok(ty)
}
