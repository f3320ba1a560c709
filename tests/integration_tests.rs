//! Integration tests for the whole pipeline.
//!
//! These tests go from source text through tokenization, parsing, type
//! checking and interpretation, and check results, printed output and the
//! rendered diagnostics.

use lang::{
    ast::{ast::Stmt, types::Type},
    compile_source,
    errors::errors::Stage,
    interpreter::{
        interpreter::{Interpreter, RunError},
        value::Value,
    },
    lexer::{lexer::tokenize, tokens::TokenKind},
    run_source,
};

fn run(source: &str) -> Result<Value, RunError> {
    let program = compile_source(source, "test.lang").unwrap();
    let mut output = Vec::new();
    let result = Interpreter::new(&program, &mut output).run("main", vec![]);
    result
}

#[test]
fn test_precedence_end_to_end() {
    let result = run("main: () -> Int32 = { return 2 + 2 * 2; }").unwrap();

    assert_eq!(result, Value::Int32(6));
    assert_eq!(result.get_type(), Type::Int32);
}

#[test]
fn test_shadowing_with_early_return() {
    let result = run("main: () -> Int32 = { a := 10; if 2 + 2 == 4 { a := 20; return a; } }").unwrap();

    assert_eq!(result, Value::Int32(20));
}

#[test]
fn test_mutable_countdown() {
    let result = run(
        "main: () -> Int32 = { var: mutable _ = 10; while var != 0 { var = var - 1; } return var; }",
    )
    .unwrap();

    assert_eq!(result, Value::Int32(0));
}

#[test]
fn test_missing_main_is_a_compile_error() {
    let result = run("helper: () -> Int32 = { return 1; }");

    match result {
        Err(RunError::CompileError(error)) => {
            assert_eq!(error.to_string(), "Function 'main' is not defined");
            assert_eq!(error.get_stage(), Stage::Compile);
        }
        other => panic!("expected a compile error, got {:?}", other),
    }
}

#[test]
fn test_missing_entry_is_reported_without_a_source_location() {
    let mut output = Vec::new();

    let errors =
        run_source("f: () -> void = { }", "entry.lang", "main", vec![], &mut output).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.to_string(),
        "entry.lang: Function 'main' is not defined\n"
    );
}

#[test]
fn test_keyword_true_is_never_an_identifier() {
    for source in ["true", "x:=true;", "(true)", "print(true)"] {
        let tokens = tokenize(source).unwrap();
        assert!(tokens
            .iter()
            .all(|token| token.value != "true" || token.kind == TokenKind::True));
    }
}

#[test]
fn test_nested_comments_are_skipped() {
    let kinds: Vec<_> = tokenize("2 + /* a /* b /* c */ */ */ 2")
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect();

    assert_eq!(
        kinds,
        vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number, TokenKind::EOF]
    );
}

#[test]
fn test_deduced_type_law() {
    let cases = [
        ("7", Type::Int32),
        ("7.5", Type::Float32),
        ("7 < 8", Type::Bool),
        ("\"seven\"", Type::string()),
        ("-(7.0 * 2.0)", Type::Float32),
        ("twice(7)", Type::Int32),
    ];

    for (expression, expected) in cases {
        let source = format!(
            "twice: (n: Int32) -> Int32 = {{ return n * 2; }}
             main: () -> void = {{ x := {}; }}",
            expression
        );
        let checked = compile_source(&source, "test.lang").unwrap();

        match &checked.find_function("main").unwrap().body.body[0] {
            Stmt::VarDecl(decl) => assert_eq!(decl.var_type.ty, expected, "for {}", expression),
            other => panic!("expected a variable definition, found {:?}", other),
        }
    }
}

#[test]
fn test_shadowing_does_not_leak() {
    let source = "main: () -> void = {
        a := 1;
        if true { a := 2.5; print(a); }
        i: mutable Int32 = 0;
        while i < 1 { a := true; print(a); i = i + 1; }
        print(a);
    }";
    let mut output = Vec::new();

    run_source(source, "test.lang", "main", vec![], &mut output).unwrap();

    assert_eq!(output, vec!["2.5", "true", "1"]);
}

#[test]
fn test_assignment_to_immutable_is_rejected_before_running() {
    let source = "main: () -> void = { print(1); a := 1; a = 2; }";
    let mut output = Vec::new();

    let errors = run_source(source, "test.lang", "main", vec![], &mut output).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(!errors.has_runtime_errors());
    assert!(output.is_empty());
    assert!(errors.get(0).unwrap().message.contains("immutable"));
}

#[test]
fn test_mutable_assignment_is_visible_in_nested_scopes() {
    let source = "main: () -> Int32 = {
        total: mutable Int32 = 1;
        if true { total = total + 1; if true { total = total * 10; } }
        return total;
    }";

    assert_eq!(run(source).unwrap(), Value::Int32(20));
}

#[test]
fn test_print_before_runtime_fault_is_kept() {
    let source = "divide: (a: Int32, b: Int32) -> Int32 = { return a / b; }
main: () -> Int32 = {
    print(\"before\");
    return divide(1, 0);
}";
    let mut output = Vec::new();

    let errors = run_source(source, "test.lang", "main", vec![], &mut output).unwrap_err();

    assert_eq!(output, vec!["before"]);
    assert!(errors.has_runtime_errors());

    let diagnostic = errors.get(0).unwrap();
    assert_eq!(diagnostic.line, 1);
    assert_eq!(diagnostic.message, "division by zero");
    assert_eq!(
        diagnostic.to_string(),
        "test.lang:1:50: division by zero\n    divide: (a: Int32, b: Int32) -> Int32 = { return a / b; }\n                                                     ^~~~~"
    );
}

#[test]
fn test_errors_from_several_functions_are_reported_together() {
    let source = "first: () -> Int32 = {
    return true;
}
second: () -> void = {
    x := missing;
}
third: () -> void = {
    print(1);
}";

    let errors = compile_source(source, "multi.lang").unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(0).unwrap().line, 2);
    assert_eq!(errors.get(1).unwrap().line, 5);

    let rendered = errors.to_string();
    assert!(rendered.contains("multi.lang:2:12:"));
    assert!(rendered.contains("multi.lang:5:10: unknown identifier \"missing\""));
}

#[test]
fn test_lex_errors_are_all_reported() {
    let errors = compile_source("main: () -> void = { a := 1 $ 2; b := @; }", "lex.lang").unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(0).unwrap().column, 28);
    assert_eq!(errors.get(1).unwrap().column, 38);
}

#[test]
fn test_parse_error_diagnostic() {
    let source = "main: () -> Int32 = {\n    a := 2 +;\n}";

    let errors = compile_source(source, "parse.lang").unwrap_err();

    assert_eq!(errors.len(), 1);
    let diagnostic = errors.get(0).unwrap();
    assert_eq!(diagnostic.line, 2);
    assert_eq!(diagnostic.column, 12);
    assert_eq!(diagnostic.snippet, "    a := 2 +;");
    assert!(diagnostic.to_string().ends_with("\n                ^"));
}

#[test]
fn test_entry_with_command_line_style_arguments() {
    let source = "power: (base: Int32, exponent: mutable Int32) -> Int32 = {
        result: mutable Int32 = 1;
        while exponent > 0 { result = result * base; exponent = exponent - 1; }
        return result;
    }";
    let arguments: Vec<Value> = ["3", "4"]
        .iter()
        .map(|argument| argument.parse().unwrap())
        .collect();
    let mut output = Vec::new();

    let result = run_source(source, "power.lang", "power", arguments, &mut output).unwrap();

    assert_eq!(result, Value::Int32(81));
}

#[test]
fn test_void_entry_returns_void() {
    let mut output = Vec::new();

    let result = run_source(
        "main: () -> void = { print(1.5 + 1.0); return; }",
        "void.lang",
        "main",
        vec![],
        &mut output,
    )
    .unwrap();

    assert_eq!(result, Value::Void);
    assert_eq!(output, vec!["2.5"]);
}
