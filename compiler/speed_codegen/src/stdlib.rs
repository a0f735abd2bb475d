//! Standard-library catalog.
//!
//! Maps an imported `(module, symbol)` pair to the external function the
//! runtime provides. Importing declares the external; calls to `symbol`
//! then resolve to its external name.

use crate::ir::{FunctionSig, IrType};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Ty {
    Int,
    Float,
    Str,
    Void,
}

impl Ty {
    fn ir(self) -> IrType {
        match self {
            Ty::Int => IrType::I32,
            Ty::Float => IrType::Double,
            Ty::Str => IrType::i8_ptr(),
            Ty::Void => IrType::Void,
        }
    }
}

/// `(module, symbol, external name, params, return)`
type Entry = (&'static str, &'static str, &'static str, &'static [Ty], Ty);

const CATALOG: &[Entry] = &[
    // io
    ("io", "print", "print", &[Ty::Str], Ty::Void),
    ("io", "readline", "readline", &[], Ty::Str),
    ("io", "file_open", "file_open", &[Ty::Str, Ty::Str], Ty::Str),
    ("io", "file_close", "file_close", &[Ty::Str], Ty::Int),
    ("io", "file_read", "file_read", &[Ty::Str, Ty::Str, Ty::Int], Ty::Int),
    ("io", "file_write", "file_write", &[Ty::Str, Ty::Str, Ty::Int], Ty::Int),
    // math
    ("math", "sin", "math_sin", &[Ty::Float], Ty::Float),
    ("math", "cos", "math_cos", &[Ty::Float], Ty::Float),
    ("math", "tan", "math_tan", &[Ty::Float], Ty::Float),
    ("math", "sqrt", "math_sqrt", &[Ty::Float], Ty::Float),
    ("math", "abs", "math_abs", &[Ty::Float], Ty::Float),
    ("math", "floor", "math_floor", &[Ty::Float], Ty::Float),
    ("math", "ceil", "math_ceil", &[Ty::Float], Ty::Float),
    ("math", "round", "math_round", &[Ty::Float], Ty::Float),
    ("math", "exp", "math_exp", &[Ty::Float], Ty::Float),
    ("math", "log", "math_log", &[Ty::Float], Ty::Float),
    ("math", "log10", "math_log10", &[Ty::Float], Ty::Float),
    ("math", "pow", "math_pow", &[Ty::Float, Ty::Float], Ty::Float),
    ("math", "min", "math_min", &[Ty::Float, Ty::Float], Ty::Float),
    ("math", "max", "math_max", &[Ty::Float, Ty::Float], Ty::Float),
    // random
    ("random", "random", "random_random", &[], Ty::Float),
    ("random", "random_int", "random_random_int", &[Ty::Int, Ty::Int], Ty::Int),
    ("random", "random_float", "random_random_float", &[Ty::Float, Ty::Float], Ty::Float),
    ("random", "seed", "random_seed", &[Ty::Int], Ty::Void),
    // string
    ("string", "length", "string_length", &[Ty::Str], Ty::Int),
    ("string", "concat", "string_concat", &[Ty::Str, Ty::Str], Ty::Str),
    ("string", "split", "string_split", &[Ty::Str, Ty::Str], Ty::Str),
    ("string", "join", "string_join", &[Ty::Str, Ty::Str], Ty::Str),
];

/// A runtime function an import can bind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalFunction {
    pub name: &'static str,
    pub sig: FunctionSig,
}

/// Look up `symbol` in `module`.
pub fn lookup(module: &str, symbol: &str) -> Option<ExternalFunction> {
    CATALOG
        .iter()
        .find(|(m, s, ..)| *m == module && *s == symbol)
        .map(|&(_, _, name, params, ret)| ExternalFunction {
            name,
            sig: FunctionSig::new(params.iter().map(|t| t.ir()).collect(), ret.ir()),
        })
}

/// Whether any symbol is catalogued under `module`.
pub fn is_module(module: &str) -> bool {
    CATALOG.iter().any(|(m, ..)| *m == module)
}
