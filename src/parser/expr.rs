use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BinaryExpr, BinaryOperator, BoolExpr, CallExpr, NumberExpr, NumberLiteral, PrefixExpr,
            PrefixOperator, StringExpr, SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser<'_>, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud,
        None => return Err(parser.unexpected_detailed("expected an expression")),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the current level, keep
    // folding it into the left hand side. Equal powers stop here, which
    // makes every binary level left-associative.
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = match parser.get_bp_lookup().get(&token_kind) {
            Some(next_bp) if *next_bp > bp => *next_bp,
            _ => break,
        };
        let led = match parser.get_led_lookup().get(&token_kind).copied() {
            Some(led) => led,
            None => break,
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => parse_number_expr(parser),
        TokenKind::Identifier => {
            let token = parser.advance();
            Ok(Expr::Symbol(SymbolExpr {
                value: token.value.to_string(),
                span: token.span,
            }))
        }
        TokenKind::String => {
            let token = parser.advance();
            Ok(Expr::String(StringExpr {
                value: token.value.to_string(),
                span: token.span,
            }))
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance();
            Ok(Expr::Bool(BoolExpr {
                value: token.kind == TokenKind::True,
                span: token.span,
            }))
        }
        _ => Err(parser.unexpected()),
    }
}

/// Parses an integer literal, or a float literal written as `digits.digits`.
///
/// The lexer keeps `.` as its own token; the three tokens only form a float
/// when nothing separates them in the source.
fn parse_number_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let whole = parser.advance();

    let dot = *parser.current_token();
    let fraction = *parser.peek(1);
    let is_float = dot.kind == TokenKind::Dot
        && fraction.kind == TokenKind::Number
        && whole.span.end.offset == dot.span.start.offset
        && dot.span.end.offset == fraction.span.start.offset;

    if is_float {
        parser.advance();
        parser.advance();

        let text = format!("{}.{}", whole.value, fraction.value);
        let span = whole.span.to(&fraction.span);
        return match text.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(Expr::Number(NumberExpr {
                value: NumberLiteral::Float32(value),
                text,
                span,
            })),
            _ => Err(Error::new(ErrorImpl::NumberParseError { token: text }, span)),
        };
    }

    match whole.value.parse::<i32>() {
        Ok(value) => Ok(Expr::Number(NumberExpr {
            value: NumberLiteral::Int32(value),
            text: whole.value.to_string(),
            span: whole.span,
        })),
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParseError {
                token: whole.value.to_string(),
            },
            whole.span,
        )),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Dash => BinaryOperator::Sub,
        TokenKind::Star => BinaryOperator::Mul,
        TokenKind::Slash => BinaryOperator::Div,
        TokenKind::Equals => BinaryOperator::Eq,
        TokenKind::NotEquals => BinaryOperator::Ne,
        TokenKind::Less => BinaryOperator::Lt,
        TokenKind::LessEquals => BinaryOperator::Le,
        TokenKind::Greater => BinaryOperator::Gt,
        TokenKind::GreaterEquals => BinaryOperator::Ge,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value.to_string(),
                },
                operator_token.span,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: left.get_span().to(right.get_span()),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Not => PrefixOperator::Not,
        TokenKind::Plus => PrefixOperator::Plus,
        _ => PrefixOperator::Minus,
    };

    // `i32::MIN` has no positive spelling, so its magnitude is only a valid
    // integer literal right after a minus.
    if operator == PrefixOperator::Minus && is_int_min_magnitude(parser) {
        let magnitude = parser.advance();
        return Ok(Expr::Number(NumberExpr {
            value: NumberLiteral::Int32(i32::MIN),
            text: format!("-{}", magnitude.value),
            span: operator_token.span.to(&magnitude.span),
        }));
    }

    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: operator_token.span.to(rhs.get_span()),
        operator,
        right_expr: Box::new(rhs),
    }))
}

fn is_int_min_magnitude(parser: &Parser<'_>) -> bool {
    let token = parser.current_token();
    token.kind == TokenKind::Number
        && parser.peek(1).kind != TokenKind::Dot
        && token.value.parse::<i64>() == Ok(-(i32::MIN as i64))
}

pub fn parse_grouping_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_error(TokenKind::CloseParen, "expected `)` to close the group")?;

    Ok(expr)
}

pub fn parse_call_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    let close = parser.expect_error(TokenKind::CloseParen, "expected `,` or `)` in call")?;

    Ok(Expr::Call(CallExpr {
        span: left.get_span().to(&close.span),
        callee: Box::new(left),
        arguments,
    }))
}
