//! AST → IR generation.
//!
//! # Passes
//!
//! Generation walks the top-level statements twice:
//!
//! 1. **Declare**: class names are registered, then in source order
//!    imports declare their externals, classes get their layouts and
//!    method signatures, and functions get their signatures. Anything else
//!    at the top level is rejected here.
//! 2. **Define**: function and method bodies are generated into the
//!    declarations from pass 1, so calls may refer to any function in the
//!    program, including the caller itself.
//!
//! # Module Structure
//!
//! - `mod.rs`: `Generator`, the two passes, type lowering
//! - `function.rs`: `FunctionLowerer`, per-function state and prologue
//! - `stmt.rs`: statements and control flow
//! - `expr.rs`: literals, variables, members, assignment, unary operators
//! - `operators.rs`: binary operator dispatch on operand type
//! - `calls.rs`: function calls, method calls, `new`

mod calls;
mod expr;
mod function;
mod operators;
mod stmt;

use rustc_hash::{FxHashMap, FxHashSet};
use speed_ir::ast::{
    ClassDeclaration, FunctionDeclaration, ImportStatement, Program, StmtKind, Type, TypeKind,
};
use speed_ir::Span;
use tracing::{debug, trace, warn};

use crate::ir::{Function, FunctionSig, IrType, Module};
use crate::layout::{FieldLayout, LayoutRegistry, StructLayout};
use crate::{stdlib, CodegenError};

use function::FunctionLowerer;

/// IR name of method `method` on class `class`.
///
/// `.` cannot appear in an identifier, so no two (class, method) pairs share
/// a symbol and no method shadows a free function.
pub fn method_symbol(class: &str, method: &str) -> String {
    format!("{class}.{method}")
}

/// State for one compilation. Consumed by [`Generator::generate`].
pub struct Generator {
    module: Module,
    layouts: LayoutRegistry,
    /// Imported symbol → external function name.
    aliases: FxHashMap<String, String>,
    /// Names in `module` that came from imports.
    externals: FxHashSet<String>,
}

impl Generator {
    pub fn new(module_name: &str) -> Self {
        Generator {
            module: Module::new(module_name),
            layouts: LayoutRegistry::new(),
            aliases: FxHashMap::default(),
            externals: FxHashSet::default(),
        }
    }

    pub fn generate(mut self, program: &Program) -> Result<Module, CodegenError> {
        debug!(statements = program.statements.len(), "generating module");

        for stmt in &program.statements {
            if let StmtKind::Class(class) = &stmt.kind {
                if !self.layouts.declare(&class.name) {
                    return Err(CodegenError::DuplicateDefinition {
                        name: class.name.clone(),
                        span: class.span,
                    });
                }
            }
        }

        for stmt in &program.statements {
            match &stmt.kind {
                StmtKind::Import(import) => self.declare_import(import, stmt.span)?,
                StmtKind::Function(func) => self.declare_function(&func.name, func, None)?,
                StmtKind::Class(class) => self.declare_class(class)?,
                other => {
                    return Err(CodegenError::MisplacedStatement {
                        what: other.describe(),
                        context: "at the top level",
                        span: stmt.span,
                    })
                }
            }
        }

        for stmt in &program.statements {
            match &stmt.kind {
                StmtKind::Function(func) => self.define_function(&func.name, func, None)?,
                StmtKind::Class(class) => {
                    for method in class.methods() {
                        let symbol = method_symbol(&class.name, &method.name);
                        self.define_function(&symbol, method, Some(&class.name))?;
                    }
                }
                _ => {}
            }
        }

        debug!(
            functions = self.module.functions().len(),
            structs = self.module.structs().len(),
            strings = self.module.globals().len(),
            "generated module"
        );
        Ok(self.module)
    }

    // -----------------------------------------------------------------------
    // Pass 1: declarations
    // -----------------------------------------------------------------------

    fn declare_import(&mut self, import: &ImportStatement, span: Span) -> Result<(), CodegenError> {
        for item in &import.items {
            let Some(external) = stdlib::lookup(&import.module, &item.name) else {
                warn!(
                    module = %import.module,
                    symbol = %item.name,
                    known_module = stdlib::is_module(&import.module),
                    "ignoring unknown import"
                );
                continue;
            };

            if self.module.contains_function(external.name) {
                if !self.externals.contains(external.name) {
                    return Err(CodegenError::DuplicateDefinition {
                        name: external.name.to_string(),
                        span: item.span,
                    });
                }
            } else {
                trace!(symbol = %item.name, external = external.name, "declaring external");
                self.module
                    .declare(Function::declaration(external.name, external.sig));
                self.externals.insert(external.name.to_string());
            }
            self.aliases
                .insert(item.name.clone(), external.name.to_string());
        }
        trace!(module = %import.module, span = %span, "import processed");
        Ok(())
    }

    fn declare_class(&mut self, class: &ClassDeclaration) -> Result<(), CodegenError> {
        let mut fields: Vec<FieldLayout> = Vec::new();
        for field in class.fields() {
            if fields.iter().any(|f| f.name == field.name) {
                return Err(CodegenError::DuplicateDefinition {
                    name: format!("{}.{}", class.name, field.name),
                    span: field.span,
                });
            }
            let ty = match &field.ty {
                Some(ty) => self.lower_value_type(ty)?,
                None => {
                    return Err(CodegenError::UnknownType {
                        name: format!("<missing type of `{}`>", field.name),
                        span: field.span,
                    })
                }
            };
            fields.push(FieldLayout {
                name: field.name.clone(),
                ty,
            });
        }

        let layout = StructLayout {
            name: class.name.clone(),
            fields,
        };
        debug!(class = %class.name, fields = layout.fields.len(), "registered layout");
        self.module.add_struct(layout.to_struct_type());
        self.layouts.define(layout);

        for method in class.methods() {
            let symbol = method_symbol(&class.name, &method.name);
            self.declare_function(&symbol, method, Some(&class.name))?;
        }
        Ok(())
    }

    /// Declare `symbol` with the signature of `func`; methods take `this` first.
    fn declare_function(
        &mut self,
        symbol: &str,
        func: &FunctionDeclaration,
        receiver: Option<&str>,
    ) -> Result<(), CodegenError> {
        let sig = self.signature(func, receiver)?;
        if !self.module.declare(Function::declaration(symbol, sig)) {
            return Err(CodegenError::DuplicateDefinition {
                name: symbol.to_string(),
                span: func.span,
            });
        }
        trace!(symbol, "declared function");
        Ok(())
    }

    fn signature(
        &self,
        func: &FunctionDeclaration,
        receiver: Option<&str>,
    ) -> Result<FunctionSig, CodegenError> {
        let mut params = Vec::with_capacity(func.params.len() + 1);
        params.extend(receiver.map(IrType::object));
        for param in &func.params {
            params.push(self.lower_value_type(&param.ty)?);
        }
        let ret = self.lower_type(&func.return_type)?;
        Ok(FunctionSig::new(params, ret))
    }

    // -----------------------------------------------------------------------
    // Pass 2: bodies
    // -----------------------------------------------------------------------

    fn define_function(
        &mut self,
        symbol: &str,
        func: &FunctionDeclaration,
        receiver: Option<&str>,
    ) -> Result<(), CodegenError> {
        debug!(symbol, "generating function body");
        let sig = self.signature(func, receiver)?;

        let mut lowerer = FunctionLowerer::new(self, sig.ret);
        let param_names = lowerer.bind_params(func, receiver, &sig.params)?;
        lowerer.lower_body(&func.body)?;
        let blocks = lowerer.finish();

        if let Some(function) = self.module.function_mut(symbol) {
            function.param_names = param_names;
            function.blocks = blocks;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Types
    // -----------------------------------------------------------------------

    /// IR type of a source type annotation.
    pub(crate) fn lower_type(&self, ty: &Type) -> Result<IrType, CodegenError> {
        Ok(match &ty.kind {
            TypeKind::Int => IrType::I32,
            TypeKind::Float => IrType::Double,
            TypeKind::String | TypeKind::Any => IrType::i8_ptr(),
            TypeKind::Bool => IrType::I1,
            TypeKind::Void => IrType::Void,
            TypeKind::Named(name) if self.layouts.is_class(name) => IrType::object(name.as_str()),
            TypeKind::Named(name) => {
                return Err(CodegenError::UnknownType {
                    name: name.clone(),
                    span: ty.span,
                })
            }
        })
    }

    /// Like [`lower_type`](Self::lower_type) but rejects `void`: the type of a
    /// parameter, variable, or field.
    pub(crate) fn lower_value_type(&self, ty: &Type) -> Result<IrType, CodegenError> {
        let lowered = self.lower_type(ty)?;
        if lowered.is_void() {
            return Err(CodegenError::TypeMismatch {
                expected: "a value type".to_string(),
                found: "void".to_string(),
                span: ty.span,
            });
        }
        Ok(lowered)
    }
}

/// Fail with `TypeMismatch` unless `found` is `expected`.
pub(crate) fn expect_type(
    expected: &IrType,
    found: &IrType,
    span: Span,
) -> Result<(), CodegenError> {
    if expected == found {
        Ok(())
    } else {
        Err(CodegenError::TypeMismatch {
            expected: expected.source_name(),
            found: found.source_name(),
            span,
        })
    }
}
