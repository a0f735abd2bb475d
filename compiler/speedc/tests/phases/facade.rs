use pretty_assertions::assert_eq;
use speed_diagnostic::ErrorCode;
use speedc::{CompileError, CompileOptions, Compiler};

const ADD: &str = "fn add(a: int, b: int): int { return a + b; }";

#[test]
fn test_compile_returns_module() {
    let module = Compiler::new().compile(ADD).unwrap();
    let text = module.to_string();
    assert!(text.starts_with("; ModuleID = 'speed_module'\n"));
    assert!(text.contains("define i32 @add(i32 %a, i32 %b)"));
    assert!(text.contains("ret i32"));
}

#[test]
fn test_custom_module_name() {
    let compiler = Compiler::with_options(CompileOptions {
        module_name: "calc".into(),
    });
    assert_eq!(compiler.options().module_name, "calc");
    let text = compiler.compile(ADD).unwrap().to_string();
    assert!(text.starts_with("; ModuleID = 'calc'\nsource_filename = \"calc\"\n"));
}

#[test]
fn test_compiler_is_reusable() {
    let compiler = Compiler::new();
    let first = compiler.compile(ADD).unwrap().to_string();
    assert!(compiler.compile("fn broken( {").is_err());
    let again = compiler.compile(ADD).unwrap().to_string();
    assert_eq!(first, again);

    // Nothing from an earlier compilation is visible in a later one.
    let other = compiler.compile("fn main(): int { return 0; }").unwrap();
    assert!(other.get_function("add").is_none());
}

#[test]
fn test_compile_to_file_writes_ir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("add.ll");
    Compiler::new().compile_to_file(ADD, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, Compiler::new().compile(ADD).unwrap().to_string());
}

#[test]
fn test_compile_to_file_writes_nothing_on_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.ll");
    let err = Compiler::new()
        .compile_to_file("fn f(): int { return x; }", &path)
        .unwrap_err();
    assert!(matches!(err, CompileError::Codegen(_)));
    assert!(!path.exists());
}

#[test]
fn test_compile_to_file_reports_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.ll");
    let err = Compiler::new().compile_to_file(ADD, &path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E9001);
    assert!(matches!(err, CompileError::Io { path: ref p, .. } if *p == path));
    assert!(err.to_string().contains("out.ll"));
}

#[test]
fn test_object_output_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("add.o");
    let err = Compiler::new().compile_to_object(ADD, &path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E5003);
    assert_eq!(err.to_string(), "object code generation is not supported");
    assert!(!path.exists());
}
