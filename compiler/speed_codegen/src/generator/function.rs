//! Per-function generation state.

use rustc_hash::FxHashSet;
use speed_ir::ast::{FunctionDeclaration, Stmt};

use crate::ir::{BasicBlock, IrType, Value};
use crate::ir_builder::IrBuilder;
use crate::scope::{Binding, Scope};
use crate::CodegenError;

use super::Generator;

/// Generates one function body into its own blocks and scope.
pub(crate) struct FunctionLowerer<'g> {
    pub(crate) cx: &'g mut Generator,
    pub(crate) builder: IrBuilder,
    pub(crate) scope: Scope,
    pub(crate) return_ty: IrType,
}

impl<'g> FunctionLowerer<'g> {
    pub(crate) fn new(cx: &'g mut Generator, return_ty: IrType) -> Self {
        FunctionLowerer {
            cx,
            builder: IrBuilder::new(),
            scope: Scope::new(),
            return_ty,
        }
    }

    /// Spill each parameter to a stack slot and bind it.
    ///
    /// `param_tys` includes the receiver type first for methods. Returns the
    /// register names to print in the function header.
    pub(crate) fn bind_params(
        &mut self,
        func: &FunctionDeclaration,
        receiver: Option<&str>,
        param_tys: &[IrType],
    ) -> Result<Vec<String>, CodegenError> {
        let names = receiver
            .map(|_| ("this", func.span))
            .into_iter()
            .chain(func.params.iter().map(|p| (p.name.as_str(), p.span)));

        let mut seen = FxHashSet::default();
        let mut registers = Vec::with_capacity(param_tys.len());
        for ((name, span), ty) in names.zip(param_tys) {
            if !seen.insert(name) {
                return Err(CodegenError::DuplicateDefinition {
                    name: name.to_string(),
                    span,
                });
            }
            let register = self.builder.unique_name(name);
            let slot = self.builder.entry_alloca(&format!("{name}.addr"), ty.clone());
            self.builder
                .store(Value::reg(ty.clone(), register.clone()), &slot);
            self.scope.bind(
                name,
                Binding {
                    ptr: slot,
                    ty: ty.clone(),
                    mutable: true,
                },
            );
            registers.push(register);
        }
        Ok(registers)
    }

    /// Generate the body, then close the final block with an implicit return.
    pub(crate) fn lower_body(&mut self, body: &[Stmt]) -> Result<(), CodegenError> {
        for stmt in body {
            self.lower_stmt(stmt)?;
        }
        if !self.builder.is_terminated() {
            match Value::zero(&self.return_ty) {
                Some(zero) => self.builder.ret(zero),
                None => self.builder.ret_void(),
            }
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Vec<BasicBlock> {
        self.builder.finish()
    }

    /// Run `f` in a child scope; its bindings are dropped afterwards.
    pub(crate) fn in_child_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CodegenError>,
    ) -> Result<T, CodegenError> {
        let parent = self.scope.child();
        let result = f(self);
        self.scope = parent;
        result
    }
}
