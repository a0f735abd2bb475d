//! Calls, method calls, and object construction.

use speed_ir::ast::{Expr, ExprKind};
use speed_ir::Span;

use crate::ir::{FunctionSig, IrType, Value};
use crate::CodegenError;

use super::function::FunctionLowerer;
use super::{expect_type, method_symbol};

impl FunctionLowerer<'_> {
    pub(crate) fn lower_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        span: Span,
    ) -> Result<Value, CodegenError> {
        match &callee.kind {
            ExprKind::Identifier(name) => {
                let (symbol, sig) = self.resolve_function(name, callee.span)?;
                let args = self.lower_args(&symbol, &sig.params, None, args, span)?;
                Ok(self.builder.call(&symbol, &sig.ret, args))
            }
            ExprKind::MemberAccess { object, member } => {
                let receiver = self.lower_expr(object)?;
                let Some(class) = receiver.ty.class_name() else {
                    return Err(CodegenError::NotAnObject {
                        ty: receiver.ty.source_name(),
                        span: object.span,
                    });
                };
                let symbol = method_symbol(class, member);
                let Some(sig) = self.signature_of(&symbol) else {
                    return Err(CodegenError::UndefinedMember {
                        class: class.to_string(),
                        member: member.clone(),
                        span: callee.span,
                    });
                };
                let args = self.lower_args(&symbol, &sig.params, Some(receiver), args, span)?;
                Ok(self.builder.call(&symbol, &sig.ret, args))
            }
            _ => Err(CodegenError::NotCallable { span: callee.span }),
        }
    }

    fn signature_of(&self, symbol: &str) -> Option<FunctionSig> {
        self.cx.module.get_function(symbol).map(|f| f.sig.clone())
    }

    /// The function `name` refers to: a declared function, else an import alias.
    fn resolve_function(
        &self,
        name: &str,
        span: Span,
    ) -> Result<(String, FunctionSig), CodegenError> {
        if let Some(sig) = self.signature_of(name) {
            return Ok((name.to_string(), sig));
        }
        self.cx
            .aliases
            .get(name)
            .and_then(|external| Some((external.clone(), self.signature_of(external)?)))
            .ok_or_else(|| CodegenError::UndefinedFunction {
                name: name.to_string(),
                span,
            })
    }

    /// Check arity and types, evaluating arguments left to right.
    ///
    /// `params` includes the receiver slot when `receiver` is given.
    fn lower_args(
        &mut self,
        callee: &str,
        params: &[IrType],
        receiver: Option<Value>,
        args: &[Expr],
        span: Span,
    ) -> Result<Vec<Value>, CodegenError> {
        let skip = usize::from(receiver.is_some());
        let expected = params.len().saturating_sub(skip);
        if args.len() != expected {
            return Err(CodegenError::ArgumentCount {
                callee: callee.to_string(),
                expected,
                found: args.len(),
                span,
            });
        }

        let mut values = Vec::with_capacity(params.len());
        values.extend(receiver);
        for (arg, param_ty) in args.iter().zip(params.iter().skip(skip)) {
            let value = self.lower_expr(arg)?;
            expect_type(param_ty, &value.ty, arg.span)?;
            values.push(value);
        }
        Ok(values)
    }

    /// `new C(args)`: a stack object initialised by `C.init` when the class
    /// has one, else by storing the arguments into the fields in order.
    pub(crate) fn lower_new(
        &mut self,
        class: &str,
        args: &[Expr],
        span: Span,
    ) -> Result<Value, CodegenError> {
        let Some(layout) = self.cx.layouts.get(class).cloned() else {
            return Err(CodegenError::UnknownType {
                name: class.to_string(),
                span,
            });
        };

        let obj = self
            .builder
            .entry_alloca(&format!("{class}.obj"), layout.ir_type());

        let init = method_symbol(class, "init");
        if let Some(sig) = self.signature_of(&init) {
            let args = self.lower_args(&init, &sig.params, Some(obj.clone()), args, span)?;
            self.builder.call(&init, &sig.ret, args);
            return Ok(obj);
        }

        if args.len() != layout.fields.len() {
            return Err(CodegenError::ArgumentCount {
                callee: class.to_string(),
                expected: layout.fields.len(),
                found: args.len(),
                span,
            });
        }
        for ((index, field), arg) in (0u32..).zip(&layout.fields).zip(args) {
            let value = self.lower_expr(arg)?;
            expect_type(&field.ty, &value.ty, arg.span)?;
            let ptr = self.builder.struct_gep(&obj, index, &field.ty);
            self.builder.store(value, &ptr);
        }
        Ok(obj)
    }
}
