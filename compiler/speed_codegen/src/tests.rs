#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::ir::{FunctionSig, IrType, Terminator};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use speed_diagnostic::ErrorCode;

fn compile(source: &str) -> Result<Module, CodegenError> {
    let tokens = speed_lexer::tokenize(source).expect("lex failed");
    let program = speed_parse::parse(&tokens).expect("parse failed");
    generate(&program)
}

fn module(source: &str) -> Module {
    match compile(source) {
        Ok(module) => module,
        Err(err) => panic!("codegen failed for {source:?}: {err}"),
    }
}

fn ir(source: &str) -> String {
    module(source).to_string()
}

fn error(source: &str) -> CodegenError {
    compile(source).expect_err("expected a codegen error")
}

fn function_ir(source: &str, name: &str) -> String {
    module(source)
        .get_function(name)
        .map(ToString::to_string)
        .unwrap_or_else(|| panic!("no function {name}"))
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_add_function() {
    let expected = "\
; ModuleID = 'speed_module'
source_filename = \"speed_module\"

define i32 @add(i32 %a, i32 %b) {
entry:
  %a.addr = alloca i32
  %b.addr = alloca i32
  store i32 %a, i32* %a.addr
  store i32 %b, i32* %b.addr
  %t0 = load i32, i32* %a.addr
  %t1 = load i32, i32* %b.addr
  %t2 = add i32 %t0, %t1
  ret i32 %t2
}
";
    assert_eq!(ir("fn add(a: int, b: int): int { return a + b; }"), expected);
}

#[test]
fn test_signature_from_annotations() {
    let m = module("fn scale(v: float, n: int, on: bool, label: string, x: any): float { return v; }");
    let f = m.get_function("scale").unwrap();
    assert_eq!(
        f.sig,
        FunctionSig::new(
            vec![
                IrType::Double,
                IrType::I32,
                IrType::I1,
                IrType::i8_ptr(),
                IrType::i8_ptr()
            ],
            IrType::Double
        )
    );
    assert_eq!(f.param_names, vec!["v", "n", "on", "label", "x"]);
}

#[test]
fn test_implicit_returns() {
    let source = "fn i(): int {} fn f(): float {} fn b(): bool {} fn s(): string {} fn v() {}";
    let m = module(source);
    let ret = |name: &str| {
        m.get_function(name)
            .and_then(|f| f.blocks.last())
            .and_then(|b| b.terminator.as_ref())
            .map(ToString::to_string)
    };
    assert_eq!(ret("i").as_deref(), Some("ret i32 0"));
    assert_eq!(ret("f").as_deref(), Some("ret double 0x0000000000000000"));
    assert_eq!(ret("b").as_deref(), Some("ret i1 false"));
    assert_eq!(ret("s").as_deref(), Some("ret i8* null"));
    assert_eq!(ret("v").as_deref(), Some("ret void"));
}

#[test]
fn test_recursion() {
    let text = function_ir(
        "fn fib(n: int): int { if n <= 1 { return n; } return fib(n - 1) + fib(n - 2); }",
        "fib",
    );
    assert_eq!(text.matches("call i32 @fib(i32 ").count(), 2);
    assert!(text.contains("icmp sle i32"));
}

#[test]
fn test_call_to_later_function() {
    let text = function_ir("fn main() { helper(); } fn helper() {}", "main");
    assert!(text.contains("call void @helper()"));
}

#[test]
fn test_same_parameter_names_in_two_functions() {
    let m = module("fn f(x: int): int { return x; } fn g(x: float): float { return x; }");
    assert!(m.get_function("f").unwrap().to_string().contains("%x.addr = alloca i32"));
    assert!(m.get_function("g").unwrap().to_string().contains("%x.addr = alloca double"));
}

#[test]
fn test_parameter_named_like_temporary() {
    let text = function_ir("fn f(t0: int): int { return t0 + 1; }", "f");
    assert!(text.starts_with("define i32 @f(i32 %t0)"));
    assert!(text.contains("%t1 = load i32, i32* %t0.addr"));
}

#[test]
fn test_statements_after_return_are_still_generated() {
    let m = module("fn f(): int { return 1; let x = 2; }");
    let f = m.get_function("f").unwrap();
    assert_eq!(f.blocks.len(), 2);
    assert_eq!(f.blocks[1].label, "dead");
    assert_eq!(
        f.blocks[1].terminator,
        Some(Terminator::Ret(Some(crate::ir::Value::const_i32(0))))
    );

    let err = error("fn f(): int { return 1; y; }");
    assert_eq!(err.code(), ErrorCode::E2003);
}

// ============================================================================
// Variables and Scopes
// ============================================================================

#[test]
fn test_variable_declaration() {
    let text = function_ir("fn f() { let x: int = 5; const pi = 2.5; }", "f");
    assert!(text.contains("%x.addr = alloca i32"));
    assert!(text.contains("store i32 5, i32* %x.addr"));
    assert!(text.contains("%pi.addr = alloca double"));
}

#[test]
fn test_annotation_must_match_value() {
    let err = error("fn f() { let x: int = 2.5; }");
    assert_eq!(err.code(), ErrorCode::E2001);
    assert_eq!(err.to_string(), "type mismatch: expected `int`, found `float`");
}

#[test]
fn test_block_bindings_do_not_escape() {
    let err = error("fn f() { if true { let y = 1; } y = 2; }");
    assert!(matches!(err, CodegenError::UndefinedVariable { ref name, .. } if name == "y"));
}

#[test]
fn test_shadowing_gets_a_new_slot() {
    let text = function_ir(
        "fn f(): int { let x = 1; if true { let x = 2.5; } return x; }",
        "f",
    );
    assert!(text.contains("%x.addr = alloca i32"));
    assert!(text.contains("%x.addr1 = alloca double"));
    assert!(text.contains("load i32, i32* %x.addr\n"));
}

#[test]
fn test_assignment() {
    let text = function_ir("fn f() { let x = 1; x = x + 2; }", "f");
    assert!(text.contains("store i32 %t1, i32* %x.addr"));
}

#[test]
fn test_assign_to_constant() {
    let err = error("fn f() { const x = 1; x = 2; }");
    assert_eq!(err.code(), ErrorCode::E2009);
}

#[test]
fn test_locals_do_not_leak_between_functions() {
    let err = error("fn f() { let secret = 1; } fn g(): int { return secret; }");
    assert_eq!(err.code(), ErrorCode::E2003);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_float_arithmetic() {
    let text = function_ir("fn f(a: float, b: float): float { return a * b - a / b; }", "f");
    for instr in ["fmul double", "fdiv double", "fsub double"] {
        assert!(text.contains(instr), "missing {instr}");
    }
}

#[test]
fn test_logical_operators() {
    let text = function_ir(
        "fn f(a: bool, b: bool): bool { return !a && b || a == b; }",
        "f",
    );
    assert!(text.contains("xor i1 %t0, true"));
    assert!(text.contains("= and i1"));
    assert!(text.contains("= or i1"));
    assert!(text.contains("= icmp eq i1"));
}

#[test]
fn test_unary_minus() {
    let text = function_ir("fn f(a: int, b: float): float { let n = -a; return -b; }", "f");
    assert!(text.contains("sub i32 0, %t0"));
    assert!(text.contains("fneg double"));
}

#[test]
fn test_negative_literals_fold() {
    let text = function_ir("fn f(): int { return -2147483648; }", "f");
    assert!(text.contains("ret i32 -2147483648"));
}

#[test]
fn test_integer_literal_out_of_range() {
    let err = error("fn f(): int { return 3000000000; }");
    assert_eq!(err.code(), ErrorCode::E5001);
}

#[test]
fn test_int_plus_string_is_rejected() {
    let err = error("fn f(a: int, b: string): int { return a + b; }");
    assert_eq!(err.code(), ErrorCode::E2001);
}

#[test]
fn test_invalid_operands() {
    assert_eq!(error("fn f(a: string) { a + a; }").code(), ErrorCode::E2008);
    assert_eq!(error("fn f(a: int) { a && a; }").code(), ErrorCode::E2008);
    assert_eq!(error("fn f(a: bool) { a < a; }").code(), ErrorCode::E2008);
    assert_eq!(error("fn f(a: string) { -a; }").code(), ErrorCode::E2008);
}

#[test]
fn test_string_constants() {
    let source = "import { print } from \"io\"; fn main() { print(\"Hello\"); print(\"Hello\"); }";
    let text = ir(source);
    assert!(text.contains("@str_0 = private unnamed_addr constant [6 x i8] c\"Hello\\00\""));
    assert!(text.contains("@str_1 = private unnamed_addr constant [6 x i8] c\"Hello\\00\""));
    assert!(text.contains(
        "call void @print(i8* getelementptr inbounds ([6 x i8], [6 x i8]* @str_0, i32 0, i32 0))"
    ));
}

#[test]
fn test_string_escapes_in_constants() {
    let text = ir("fn f(): string { return \"a\\n\\\"b\\\"\"; }");
    assert!(text.contains("c\"a\\0A\\22b\\22\\00\""), "{text}");
}

#[test]
fn test_string_constants_avoid_function_names() {
    let m = module("fn str_0(): string { return \"a\"; } fn str_1() {}");
    assert_eq!(
        m.globals().iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
        ["str_2"]
    );
    let text = m.to_string();
    assert!(text.contains("define i8* @str_0()"), "{text}");
    assert!(text.contains("@str_2, i32 0, i32 0)"), "{text}");
}

// ============================================================================
// Control Flow
// ============================================================================

#[test]
fn test_if_else_blocks() {
    let text = function_ir(
        "fn sign(x: int): int { if (x > 0) { return 1; } else { return -1; } }",
        "sign",
    );
    assert!(text.contains("br i1 %t1, label %if.then0, label %if.else0"));
    assert!(text.contains("\nif.then0:\n  ret i32 1\n"));
    assert!(text.contains("\nif.else0:\n  ret i32 -1\n"));
    assert!(text.contains("\nif.end0:\n  ret i32 0\n"));
}

#[test]
fn test_if_without_else_branches_to_end() {
    let text = function_ir("fn f(x: bool) { if x { } }", "f");
    assert!(text.contains("label %if.then0, label %if.end0"));
}

#[test]
fn test_while_loop() {
    let text = function_ir(
        "fn f(): int { let i = 0; while (i < 10) { i = i + 1; } return i; }",
        "f",
    );
    assert!(text.contains("br label %while.cond0"));
    assert!(text.contains("label %while.body0, label %while.end0"));
    assert!(text.contains("\nwhile.end0:\n"));
}

#[test]
fn test_for_loop() {
    let text = function_ir(
        "fn f(): int { let s = 0; for (let i = 0; i < 3; i = i + 1) { s = s + i; } return s; }",
        "f",
    );
    for label in ["for.cond0:", "for.body0:", "for.step0:", "for.end0:"] {
        assert!(text.contains(label), "missing {label}");
    }
    let err = error("fn f() { for (let i = 0; i < 3; i = i + 1) { } i = 1; }");
    assert_eq!(err.code(), ErrorCode::E2003);
}

#[test]
fn test_numeric_conditions_compare_with_zero() {
    let text = function_ir("fn f(n: int, x: float) { while n { } if x { } }", "f");
    assert!(text.contains("icmp ne i32 %t0, 0"));
    assert!(text.contains("fcmp one double %t2, 0x0000000000000000"));
}

#[test]
fn test_string_condition_is_rejected() {
    assert_eq!(error("fn f(s: string) { if s { } }").code(), ErrorCode::E2001);
}

// ============================================================================
// Classes
// ============================================================================

const POINT: &str = "
class Point {
    x: float;
    y: float;
    fn distance(): float {
        return this.x * this.x + this.y * this.y;
    }
}
";

#[test]
fn test_class_layout_and_method() {
    let m = module(POINT);
    assert_eq!(m.structs().len(), 1);
    assert_eq!(m.structs()[0].name, "Point");
    assert_eq!(m.structs()[0].fields, vec![IrType::Double, IrType::Double]);

    assert_eq!(m.functions().len(), 1);
    let method = m.get_function("Point.distance").unwrap();
    assert_eq!(method.sig.params, vec![IrType::object("Point")]);
    assert_eq!(method.param_names, vec!["this"]);

    let text = m.to_string();
    assert!(text.contains("%struct.Point = type { double, double }"));
    assert!(text.contains(
        "getelementptr inbounds %struct.Point, %struct.Point* %t0, i32 0, i32 0"
    ));
    assert!(text.contains("i32 0, i32 1"));
}

#[test]
fn test_new_and_method_call() {
    let source = format!(
        "{POINT} fn main(): float {{ let p = new Point(3.0, 4.0); p.x = 1.0; return p.distance(); }}"
    );
    let text = function_ir(&source, "main");
    assert!(text.contains("%Point.obj = alloca %struct.Point"));
    assert!(text.contains("%p.addr = alloca %struct.Point*"));
    assert!(text.contains("store double 0x4008000000000000, double* %t0"));
    assert!(text.contains("store %struct.Point* %Point.obj, %struct.Point** %p.addr"));
    assert!(text.contains("call double @Point.distance(%struct.Point* "));
}

#[test]
fn test_new_calls_init_when_present() {
    let source = "
        class Counter {
            count: int;
            fn init(start: int) { this.count = start; }
            fn get(): int { return this.count; }
        }
        fn main(): int { let c = new Counter(5); return c.get(); }
    ";
    let text = function_ir(source, "main");
    assert!(text.contains("call void @Counter.init(%struct.Counter* %Counter.obj, i32 5)"));
}

#[test]
fn test_new_argument_count() {
    let err = error(&format!("{POINT} fn main() {{ let p = new Point(1.0); }}"));
    assert_eq!(err.code(), ErrorCode::E2006);
}

#[test]
fn test_method_symbols_do_not_collide() {
    let m = module(
        "class A { fn b_c(): int { return 1; } }
         class A_b { fn c(): int { return 2; } }
         fn A_b_c(): int { return 3; }",
    );
    assert!(m.get_function("A.b_c").is_some());
    assert!(m.get_function("A_b.c").is_some());
    assert!(m.get_function("A_b_c").is_some());
    assert_eq!(m.functions().len(), 3);
}

#[test]
fn test_self_referencing_class() {
    let text = ir("class Node { next: Node; value: int; }");
    assert!(text.contains("%struct.Node = type { %struct.Node*, i32 }"));
}

#[test]
fn test_undefined_member() {
    let err = error(&format!("{POINT} fn main(): float {{ let p = new Point(1.0, 2.0); return p.z; }}"));
    assert!(matches!(
        err,
        CodegenError::UndefinedMember { ref class, ref member, .. } if class == "Point" && member == "z"
    ));

    let err = error(&format!("{POINT} fn main() {{ let p = new Point(1.0, 2.0); p.scale(); }}"));
    assert_eq!(err.code(), ErrorCode::E2005);
}

#[test]
fn test_member_of_non_object() {
    let err = error("fn f(n: int): int { return n.x; }");
    assert_eq!(err.code(), ErrorCode::E2010);
    assert_eq!(error("fn f() { 1(2); }").code(), ErrorCode::E2010);
}

#[test]
fn test_unknown_type() {
    let err = error("fn f(p: Missing) {}");
    assert!(matches!(err, CodegenError::UnknownType { ref name, .. } if name == "Missing"));
}

// ============================================================================
// Imports and Calls
// ============================================================================

#[test]
fn test_imports_declare_externals_only() {
    let m = module("import { print } from \"io\"; import { sin, cos } from \"math\";");
    let names: Vec<&str> = m.functions().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["print", "math_sin", "math_cos"]);
    assert!(m.functions().iter().all(crate::ir::Function::is_declaration));

    let text = m.to_string();
    assert!(text.contains("declare void @print(i8*)"));
    assert!(text.contains("declare double @math_sin(double)"));
}

#[test]
fn test_imports_are_idempotent() {
    let m = module("import { sqrt } from \"math\"; import { sqrt, sqrt } from \"math\";");
    assert_eq!(m.functions().len(), 1);
}

#[test]
fn test_unknown_imports_are_ignored() {
    let m = module("import { teleport } from \"physics\"; import { nope } from \"math\";");
    assert!(m.functions().is_empty());
}

#[test]
fn test_calls_resolve_through_aliases() {
    let text = ir("import { sqrt } from \"math\"; fn f(x: float): float { return sqrt(x); }");
    assert!(text.contains("call double @math_sqrt(double %t0)"));
}

#[test]
fn test_undefined_function() {
    let err = error("fn main() { launch(); }");
    assert!(matches!(err, CodegenError::UndefinedFunction { ref name, .. } if name == "launch"));
    // Not imported, so not callable.
    assert_eq!(error("fn f(x: float): float { return sqrt(x); }").code(), ErrorCode::E2004);
}

#[test]
fn test_argument_checks() {
    let add = "fn add(a: int, b: int): int { return a + b; }";
    assert_eq!(error(&format!("{add} fn m() {{ add(1); }}")).code(), ErrorCode::E2006);
    assert_eq!(error(&format!("{add} fn m() {{ add(1, 2.0); }}")).code(), ErrorCode::E2001);
}

#[test]
fn test_void_value_cannot_be_bound() {
    let err = error("fn v() {} fn m() { let x = v(); }");
    assert_eq!(err.code(), ErrorCode::E2001);
}

#[test]
fn test_return_type_checked() {
    assert_eq!(error("fn f(): int { return 1.5; }").code(), ErrorCode::E2001);
    assert_eq!(error("fn f(): int { return; }").code(), ErrorCode::E2001);
    assert_eq!(error("fn f() { return 1; }").code(), ErrorCode::E2001);
}

// ============================================================================
// Program Structure
// ============================================================================

#[test]
fn test_duplicate_definitions() {
    assert_eq!(error("fn f() {} fn f() {}").code(), ErrorCode::E2007);
    assert_eq!(error("class A {} class A {}").code(), ErrorCode::E2007);
    assert_eq!(error("class A { x: int; x: int; }").code(), ErrorCode::E2007);
    assert_eq!(error("fn f(a: int, a: int) {}").code(), ErrorCode::E2007);
    assert_eq!(
        error("fn print(s: string) {} import { print } from \"io\";").code(),
        ErrorCode::E2007
    );
}

#[test]
fn test_misplaced_statements() {
    let err = error("let x = 1;");
    assert_eq!(err.code(), ErrorCode::E5002);
    assert_eq!(err.to_string(), "variable declaration is not allowed at the top level");

    assert_eq!(error("return 1;").code(), ErrorCode::E5002);
    assert_eq!(error("fn f() { fn g() {} }").code(), ErrorCode::E5002);
    assert_eq!(error("fn f() { import { print } from \"io\"; }").code(), ErrorCode::E5002);
}

#[test]
fn test_empty_program() {
    let m = module("");
    assert!(m.functions().is_empty());
    assert_eq!(m.name(), DEFAULT_MODULE_NAME);
}

#[test]
fn test_module_name_option() {
    let tokens = speed_lexer::tokenize("fn f() {}").unwrap();
    let program = speed_parse::parse(&tokens).unwrap();
    let m = generate_module(&program, "demo").unwrap();
    assert!(m.to_string().starts_with("; ModuleID = 'demo'\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let source = format!(
        "import {{ print }} from \"io\"; {POINT} fn main() {{ print(\"a\"); let p = new Point(1.0, 2.0); print(\"b\"); }}"
    );
    assert_eq!(ir(&source), ir(&source));
}

#[test]
fn test_deep_unary_chain() {
    let source = format!("fn f(b: bool): bool {{ return {}b; }}", "!".repeat(5000));
    let text = function_ir(&source, "f");
    assert_eq!(text.matches("xor i1").count(), 5000);
}

#[test]
fn test_long_binary_chain() {
    let terms = vec!["1"; 20_000].join(" + ");
    let text = function_ir(&format!("fn f(): int {{ return {terms}; }}"), "f");
    assert_eq!(text.matches(" = add i32 ").count(), 19_999);
}

#[test]
fn test_deeply_nested_blocks() {
    let depth = 2000;
    let source = format!(
        "fn f(n: int): int {{ {} return n; {} }}",
        "if n > 0 { ".repeat(depth),
        "}".repeat(depth)
    );
    let text = function_ir(&source, "f");
    assert!(text.contains(&format!("if.then{}", depth - 1)));
}

// ============================================================================
// Instruction Families
// ============================================================================

const ARITHMETIC: [(&str, &str, &str); 4] = [
    ("+", "add", "fadd"),
    ("-", "sub", "fsub"),
    ("*", "mul", "fmul"),
    ("/", "sdiv", "fdiv"),
];

const COMPARISONS: [(&str, &str, &str); 6] = [
    ("==", "icmp eq", "fcmp oeq"),
    ("!=", "icmp ne", "fcmp one"),
    ("<", "icmp slt", "fcmp olt"),
    (">", "icmp sgt", "fcmp ogt"),
    ("<=", "icmp sle", "fcmp ole"),
    (">=", "icmp sge", "fcmp oge"),
];

proptest! {
    #[test]
    fn int_operands_select_int_family(a in 0i32..i32::MAX, b in 0i32..i32::MAX, i in 0usize..4, j in 0usize..6) {
        let (sym, int, float) = ARITHMETIC[i];
        let text = ir(&format!("fn f(): int {{ return {a} {sym} {b}; }}"));
        let expected = format!(" = {int} i32 {a}, {b}");
        prop_assert!(text.contains(&expected));
        let unexpected = format!(" = {float} ");
        prop_assert!(!text.contains(&unexpected));

        let (sym, int, float) = COMPARISONS[j];
        let text = ir(&format!("fn f(): bool {{ return {a} {sym} {b}; }}"));
        let expected = format!(" = {int} i32 ");
        prop_assert!(text.contains(&expected));
        prop_assert!(!text.contains(float));
    }

    #[test]
    fn float_operands_select_float_family(a in 0.0f64..1e6, b in 0.0f64..1e6, i in 0usize..4, j in 0usize..6) {
        let (sym, int, float) = ARITHMETIC[i];
        let text = ir(&format!("fn f(): float {{ return {a:.3} {sym} {b:.3}; }}"));
        let expected = format!(" = {float} double ");
        prop_assert!(text.contains(&expected));
        let unexpected = format!(" = {int} ");
        prop_assert!(!text.contains(&unexpected));

        let (sym, int, float) = COMPARISONS[j];
        let text = ir(&format!("fn f(): bool {{ return {a:.3} {sym} {b:.3}; }}"));
        let expected = format!(" = {float} double ");
        prop_assert!(text.contains(&expected));
        prop_assert!(!text.contains(int));
    }
}
