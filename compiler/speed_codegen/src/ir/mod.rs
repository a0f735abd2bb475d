//! In-memory IR and its LLVM textual form.
//!
//! A [`Module`] owns struct types, string constants, and functions; each
//! function owns its basic blocks. `Display` on any of these prints LLVM
//! assembly with typed pointers (`i8*`, `%struct.Point*`).

mod instr;
mod module;
mod types;
mod value;

pub use instr::{BasicBlock, BinaryOpcode, FloatPredicate, Instr, IntPredicate, Terminator};
pub use module::{Function, GlobalString, Module, StructType};
pub use types::{FunctionSig, IrType};
pub use value::{Operand, Typed, Value};
