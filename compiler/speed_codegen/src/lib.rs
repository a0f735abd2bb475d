//! Speed code generator.
//!
//! Translates a parsed [`Program`] into an [`ir::Module`] whose `Display`
//! is LLVM textual IR. Generation is a single walk over the AST with no
//! optimization; every call to [`generate`] starts from fresh state.
//!
//! # Architecture
//!
//! | Module | Role |
//! |--------|------|
//! | `ir` | IR data model and printer |
//! | `ir_builder` | Per-function instruction builder |
//! | `scope` | Persistent lexical scopes for locals |
//! | `layout` | Class → struct layout registry |
//! | `stdlib` | Importable runtime functions |
//! | `generator` | AST walk |
//!
//! # Example
//!
//! ```text
//! fn add(a: int, b: int): int { return a + b; }
//! ```
//!
//! generates
//!
//! ```text
//! define i32 @add(i32 %a, i32 %b) {
//! entry:
//!   %a.addr = alloca i32
//!   %b.addr = alloca i32
//!   store i32 %a, i32* %a.addr
//!   store i32 %b, i32* %b.addr
//!   %t0 = load i32, i32* %a.addr
//!   %t1 = load i32, i32* %b.addr
//!   %t2 = add i32 %t0, %t1
//!   ret i32 %t2
//! }
//! ```

mod error;
mod generator;
pub mod ir;
pub mod ir_builder;
pub mod layout;
pub mod scope;
mod stack;
pub mod stdlib;

use speed_ir::ast::Program;

pub use error::CodegenError;
pub use generator::{method_symbol, Generator};
pub use ir::Module;

/// Module name used when the caller does not pick one.
pub const DEFAULT_MODULE_NAME: &str = "speed_module";

/// Generate IR for `program` into a module named [`DEFAULT_MODULE_NAME`].
pub fn generate(program: &Program) -> Result<Module, CodegenError> {
    generate_module(program, DEFAULT_MODULE_NAME)
}

/// Generate IR for `program` into a module named `module_name`.
pub fn generate_module(program: &Program, module_name: &str) -> Result<Module, CodegenError> {
    Generator::new(module_name).generate(program)
}

#[cfg(test)]
mod tests;
