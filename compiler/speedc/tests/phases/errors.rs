use speed_diagnostic::ErrorCode;
use speed_ir::Span;
use speedc::{CompileError, Compiler};

fn compile_err(source: &str) -> CompileError {
    Compiler::new()
        .compile(source)
        .expect_err("expected compilation to fail")
}

#[test]
fn test_lex_error() {
    let err = compile_err("fn main() { let x = 1 $ 2; }");
    assert!(matches!(err, CompileError::Lex(_)));
    assert_eq!(err.code(), ErrorCode::E0001);
    assert_eq!(err.to_diagnostic().primary_span(), Some(Span::new(22, 23)));
}

#[test]
fn test_parse_error_missing_semicolon() {
    let err = compile_err(
        "fn add(a: int, b: int): int {
            return a + b
        }",
    );
    assert!(matches!(err, CompileError::Parse(_)));
    assert_eq!(err.code(), ErrorCode::E1001);
    assert!(err.to_string().contains("expected `;`"));
}

#[test]
fn test_type_error() {
    let err = compile_err("fn add(a: int, b: string): int { return a + b; }");
    assert!(matches!(err, CompileError::Codegen(_)));
    assert_eq!(err.code(), ErrorCode::E2001);
}

#[test]
fn test_undefined_names() {
    assert_eq!(compile_err("fn f(): int { return y; }").code(), ErrorCode::E2003);
    assert_eq!(compile_err("fn f() { g(); }").code(), ErrorCode::E2004);
}

#[test]
fn test_errors_render_as_diagnostics() {
    let source = "fn main() { launch(); }";
    let diag = compile_err(source).to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E2004);
    assert_eq!(diag.primary_span(), Some(Span::new(12, 18)));
    assert!(diag.message.contains("launch"));
}
