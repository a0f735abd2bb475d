use speedc::Compiler;

fn compile(source: &str) -> String {
    match Compiler::new().compile(source) {
        Ok(module) => module.to_string(),
        Err(err) => panic!("compilation failed: {err}"),
    }
}

#[test]
fn test_fibonacci() {
    let ir = compile(
        "fn fibonacci(n: int): int {
            if n <= 1 {
                return n;
            }
            return fibonacci(n - 1) + fibonacci(n - 2);
        }",
    );
    assert!(ir.contains("define i32 @fibonacci(i32 %n)"));
    assert!(ir.contains("icmp sle i32"));
    assert!(ir.contains("call i32 @fibonacci"));
}

#[test]
fn test_standard_library_imports() {
    let ir = compile(
        r#"
        import { print } from "io";
        import { sin, cos } from "math";
        import { length, concat } from "string";

        fn main(): void {
            let x = 2.5;
            let y = sin(x) + cos(x);
            let str1 = "Hello";
            let str2 = "World";
            print(concat(str1, str2));
            let n = length(str1);
        }
        "#,
    );
    assert!(ir.contains("declare void @print(i8*)"));
    assert!(ir.contains("declare double @math_sin(double)"));
    assert!(ir.contains("declare double @math_cos(double)"));
    assert!(ir.contains("declare i32 @string_length(i8*)"));
    assert!(ir.contains("declare i8* @string_concat(i8*, i8*)"));
    assert!(ir.contains("@str_0 = private unnamed_addr constant [6 x i8] c\"Hello\\00\""));
    assert!(ir.contains("call i8* @string_concat("));
}

#[test]
fn test_classes_and_methods() {
    let ir = compile(
        r#"
        import { sqrt } from "math";

        class Point {
            x: float;
            y: float;

            fn init(x: float, y: float) {
                this.x = x;
                this.y = y;
            }

            fn distance(other: Point): float {
                let dx = this.x - other.x;
                let dy = this.y - other.y;
                return sqrt(dx * dx + dy * dy);
            }
        }

        fn main(): float {
            let origin = new Point(0.0, 0.0);
            let p = new Point(3.0, 4.0);
            return p.distance(origin);
        }
        "#,
    );
    assert!(ir.contains("%struct.Point = type { double, double }"));
    assert!(ir.contains("define void @Point.init(%struct.Point* %this, double %x, double %y)"));
    assert!(ir.contains(
        "define double @Point.distance(%struct.Point* %this, %struct.Point* %other)"
    ));
    assert!(ir.contains("call double @math_sqrt(double "));
    assert!(ir.contains("call void @Point.init(%struct.Point* %Point.obj, double 0x0000000000000000, double 0x0000000000000000)"));
}

#[test]
fn test_loops_and_mutation() {
    let ir = compile(
        "fn sum_to(n: int): int {
            let total = 0;
            for (let i = 1; i <= n; i = i + 1) {
                total = total + i;
            }
            let k = n;
            while k > 0 {
                k = k - 1;
            }
            return total;
        }",
    );
    for label in ["for.cond", "for.body", "for.step", "for.end", "while.cond", "while.body", "while.end"] {
        assert!(ir.contains(label), "missing block {label}");
    }
    assert!(ir.contains("icmp sgt i32"));
}

#[test]
fn test_logic_and_floats() {
    let ir = compile(
        "fn check(a: float, b: float, strict: bool): bool {
            if !strict || a >= b && a != 0.0 {
                return true;
            }
            return -a < b;
        }",
    );
    assert!(ir.contains("fcmp oge double"));
    assert!(ir.contains("fcmp one double"));
    assert!(ir.contains("fneg double"));
    assert!(ir.contains("and i1"));
    assert!(ir.contains("or i1"));
}

#[test]
fn test_deeply_nested_input() {
    let source = format!("fn f(b: bool): bool {{ return {}b; }}", "!".repeat(50_000));
    assert!(compile(&source).contains("xor i1"));

    let source = format!("fn g(): int {{ return {}1{}; }}", "(".repeat(10_000), ")".repeat(10_000));
    assert!(compile(&source).contains("ret i32 1"));
}
