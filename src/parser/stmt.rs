use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        statements::{
            AssignmentStmt, BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, Parameter, ReturnStmt,
            VarDeclStmt, WhileStmt,
        },
        types::{QualifiedType, Qualifier, Type},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{
    parser::Parser,
    types::{parse_explicit_type, parse_type},
};

/// Parses one top-level definition into `program`.
///
/// Only function definitions (`name: (...) -> T = { ... }`) and global
/// variable definitions are allowed at the top level.
pub fn parse_top_level(parser: &mut Parser<'_>, program: &mut Program) -> Result<(), Error> {
    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(parser.unexpected_detailed("expected a function or variable definition"));
    }

    match (parser.peek(1).kind, parser.peek(2).kind) {
        (TokenKind::Colon, TokenKind::OpenParen) => {
            program.functions.push(parse_fn_decl_stmt(parser)?);
        }
        (TokenKind::Colon, _) | (TokenKind::ColonEquals, _) => {
            program.globals.push(parse_var_decl_stmt(parser)?);
        }
        _ => {
            parser.advance();
            return Err(parser.unexpected_detailed("expected `:` or `:=` after the name"));
        }
    }

    Ok(())
}

pub fn parse_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected_detailed("expected a statement")),
    }
}

/// Statements starting with a name are told apart by the token after it.
pub fn parse_identifier_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    match (parser.peek(1).kind, parser.peek(2).kind) {
        (TokenKind::Colon, TokenKind::OpenParen) => {
            parser.advance();
            parser.advance();
            Err(parser.unexpected_detailed("functions can only be defined at the top level"))
        }
        (TokenKind::Colon, _) | (TokenKind::ColonEquals, _) => {
            Ok(Stmt::VarDecl(parse_var_decl_stmt(parser)?))
        }
        (TokenKind::Assignment, _) => parse_assignment_stmt(parser),
        _ => parse_call_stmt(parser),
    }
}

pub fn parse_var_decl_stmt(parser: &mut Parser<'_>) -> Result<VarDeclStmt, Error> {
    let name = parser.expect(TokenKind::Identifier)?;

    let var_type;
    let assigned_value;

    if parser.current_token_kind() == TokenKind::ColonEquals {
        parser.advance();
        var_type = QualifiedType::new(Type::Deduced, Qualifier::None);
        assigned_value = Some(parse_expr(parser, BindingPower::Default)?);
    } else {
        parser.expect(TokenKind::Colon)?;
        var_type = parse_qualified_type(parser)?;

        if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            assigned_value = Some(parse_expr(parser, BindingPower::Default)?);
        } else {
            assigned_value = None;
        }
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(VarDeclStmt {
        identifier: name.value.to_string(),
        var_type,
        assigned_value,
        span: name.span.to(&parser.previous_span()),
    })
}

/// `mutable? Type`, where `Type` may be `_`.
fn parse_qualified_type(parser: &mut Parser<'_>) -> Result<QualifiedType, Error> {
    let qualifier = if parser.current_token_kind() == TokenKind::Mutable {
        parser.advance();
        Qualifier::Mutable
    } else {
        Qualifier::None
    };

    Ok(QualifiedType::new(parse_type(parser)?, qualifier))
}

pub fn parse_assignment_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Assignment(AssignmentStmt {
        identifier: name.value.to_string(),
        value,
        span: name.span.to(&parser.previous_span()),
    }))
}

pub fn parse_call_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let start = parser.current_token().span;
    let expr = parse_expr(parser, BindingPower::Default)?;

    let call = match expr {
        Expr::Call(call) => call,
        _ => return Err(parser.unexpected_detailed("only calls can be used as statements")),
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt {
        expression: call,
        span: start.to(&parser.previous_span()),
    }))
}

pub fn parse_if_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    Ok(Stmt::If(parse_if(parser)?))
}

fn parse_if(parser: &mut Parser<'_>) -> Result<IfStmt, Error> {
    let start = parser.advance().span;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_block(parser)?;

    let else_body;
    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            // `else if` is an else block holding a single if statement.
            let nested = parse_if(parser)?;
            let span = nested.span;
            else_body = BlockStmt::new(vec![Stmt::If(nested)], span);
        } else {
            else_body = parse_block(parser)?;
        }
    } else {
        else_body = BlockStmt::new(vec![], parser.previous_span());
    }

    Ok(IfStmt {
        condition,
        then_body,
        else_body,
        span: start.to(&parser.previous_span()),
    })
}

pub fn parse_while_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let start = parser.advance().span;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span: start.to(&parser.previous_span()),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let start = parser.advance().span;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: start.to(&parser.previous_span()),
    }))
}

pub fn parse_block(parser: &mut Parser<'_>) -> Result<BlockStmt, Error> {
    let start = parser.expect_error(TokenKind::OpenCurly, "expected `{` to open a block")?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected_detailed("expected `}` to close the block"));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt::new(statements, start.span.to(&parser.previous_span())))
}

/// `name: (a: T, b: mutable U) -> R = { ... }`
pub fn parse_fn_decl_stmt(parser: &mut Parser<'_>) -> Result<FnDeclStmt, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            parameters.push(parse_parameter(parser)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect_error(TokenKind::CloseParen, "expected `,` or `)` after a parameter")?;
    parser.expect_error(TokenKind::Arrow, "expected `->` and a return type")?;
    let return_type = parse_explicit_type(parser, "the return type cannot be deduced")?;
    parser.expect_error(TokenKind::Assignment, "expected `=` before the function body")?;

    let body = parse_block(parser)?;

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(FnDeclStmt {
        identifier: name.value.to_string(),
        parameters,
        return_type,
        body,
        span: name.span.to(&parser.previous_span()),
    })
}

fn parse_parameter(parser: &mut Parser<'_>) -> Result<Parameter, Error> {
    let name = parser.expect_error(TokenKind::Identifier, "expected a parameter name")?;
    parser.expect(TokenKind::Colon)?;

    let qualifier = if parser.current_token_kind() == TokenKind::Mutable {
        parser.advance();
        Qualifier::Mutable
    } else {
        Qualifier::None
    };
    let ty = parse_explicit_type(parser, "parameters need an explicit type")?;

    Ok(Parameter {
        name: name.value.to_string(),
        param_type: QualifiedType::new(ty, qualifier),
        span: name.span.to(&parser.previous_span()),
    })
}
