//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric and string literals
//! - Operators and punctuation
//! - Line and nested block comments
//! - Positions and error cases

use crate::errors::errors::ErrorImpl;

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "true false for if else while return mutable _";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::True);
    assert_eq!(tokens[1].kind, TokenKind::False);
    assert_eq!(tokens[2].kind, TokenKind::For);
    assert_eq!(tokens[3].kind, TokenKind::If);
    assert_eq!(tokens[4].kind, TokenKind::Else);
    assert_eq!(tokens[5].kind, TokenKind::While);
    assert_eq!(tokens[6].kind, TokenKind::Return);
    assert_eq!(tokens[7].kind, TokenKind::Mutable);
    assert_eq!(tokens[8].kind, TokenKind::Underscore);
    assert_eq!(tokens[9].kind, TokenKind::EOF);
}

#[test]
fn test_keyword_wins_regardless_of_context() {
    for source in ["true", "(true)", "x==true;", "/* c */true// trailing", "\"s\"true"] {
        let tokens = tokenize(source).unwrap();
        let found = tokens.iter().find(|token| token.value == "true").unwrap();
        assert_eq!(found.kind, TokenKind::True, "in {:?}", source);
    }
}

#[test]
fn test_keyword_prefixes_are_identifiers() {
    let tokens = tokenize("trueish iffy _x while_1").unwrap();

    for token in &tokens[..4] {
        assert_eq!(token.kind, TokenKind::Identifier);
    }
    assert_eq!(tokens[0].value, "trueish");
    assert_eq!(tokens[2].value, "_x");
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].value, "CamelCase");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers_keep_dot_separate() {
    let tokens = tokenize("42 3.14 0").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "3");
    assert_eq!(tokens[2].kind, TokenKind::Dot);
    assert_eq!(tokens[3].kind, TokenKind::Number);
    assert_eq!(tokens[3].value, "14");
    assert_eq!(tokens[4].value, "0");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings_without_escapes() {
    let tokens = tokenize(r#""hello" "multiple words" "back\slash""#).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].value, "back\\slash");
    assert_eq!(tokens[0].span.len(), 7);
}

#[test]
fn test_unterminated_string() {
    let errors = tokenize("x := \"abc\ny := 1;").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(*errors[0].get_impl(), ErrorImpl::UnterminatedString);
    assert_eq!(errors[0].get_span().start.column, 5);

    let errors = tokenize("\"open").unwrap_err();
    assert_eq!(*errors[0].get_impl(), ErrorImpl::UnterminatedString);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / == != < > <= >= = ! := ->"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::ColonEquals,
            TokenKind::Arrow,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } . , ; :"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_two_character_operators_without_spaces() {
    assert_eq!(
        kinds("a:=b->c==d"),
        vec![
            TokenKind::Identifier,
            TokenKind::ColonEquals,
            TokenKind::Identifier,
            TokenKind::Arrow,
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_line_comments() {
    let tokens = tokenize("x := 5; // this is a comment\ny := 10;").unwrap();

    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[3].kind, TokenKind::Semicolon);
    assert_eq!(tokens[4].value, "y");
    assert_eq!(tokens[4].span.start.line, 2);
}

#[test]
fn test_nested_block_comments_are_skipped() {
    let tokens = tokenize("2 + /* a /* b /* c */ */ */ 2").unwrap();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "2");
    assert_eq!(tokens[1].kind, TokenKind::Plus);
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "2");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_block_comment_spanning_lines() {
    let tokens = tokenize("/* one\n /* two\n */ three */\nx").unwrap();

    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[0].span.start.line, 4);
    assert_eq!(tokens[0].span.start.column, 0);
}

#[test]
fn test_unterminated_block_comment() {
    let errors = tokenize("1 /* /* */").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(*errors[0].get_impl(), ErrorImpl::UnterminatedComment);
    assert_eq!(errors[0].get_span().start.column, 2);
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("main: () -> Int32 = {\n\treturn 1;\n}").unwrap();

    assert_eq!(tokens[0].span.start.line, 1);
    assert_eq!(tokens[0].span.start.column, 0);
    assert_eq!(tokens[3].kind, TokenKind::CloseParen);
    assert_eq!(tokens[3].span.start.column, 7);

    let ret = tokens
        .iter()
        .find(|token| token.kind == TokenKind::Return)
        .unwrap();
    assert_eq!(ret.span.start.line, 2);
    assert_eq!(ret.span.start.column, 1);
    assert_eq!(ret.span.end.column, 7);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let errors = tokenize("x := @;").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UnrecognisedToken");
    assert_eq!(errors[0].get_span().start.column, 5);
}

#[test]
fn test_lex_errors_accumulate() {
    let errors = tokenize("a @ b\n# c $").unwrap_err();

    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].get_span().start.line, 1);
    assert_eq!(errors[1].get_span().start.line, 2);
    assert_eq!(errors[1].get_span().start.column, 0);
    assert_eq!(errors[2].get_span().start.column, 4);
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("   \n\t // only a comment"), vec![TokenKind::EOF]);
}
