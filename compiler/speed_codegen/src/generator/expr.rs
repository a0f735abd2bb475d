//! Expression lowering: literals, variables, members, assignment, unary operators.

use speed_ir::ast::{Expr, ExprKind, Literal, UnaryOp};
use speed_ir::Span;

use crate::ir::{BinaryOpcode, IrType, Value};
use crate::scope::Binding;
use crate::stack::ensure_sufficient_stack;
use crate::CodegenError;

use super::expect_type;
use super::function::FunctionLowerer;

impl FunctionLowerer<'_> {
    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> Result<Value, CodegenError> {
        ensure_sufficient_stack(|| self.lower_expr_inner(expr))
    }

    fn lower_expr_inner(&mut self, expr: &Expr) -> Result<Value, CodegenError> {
        match &expr.kind {
            ExprKind::Literal(lit) => self.lower_literal(lit, expr.span),
            ExprKind::Identifier(name) => {
                let ptr = self.variable(name, expr.span)?.ptr.clone();
                Ok(self.builder.load(&ptr))
            }
            ExprKind::Binary { op, left, right } => self.lower_binary(*op, left, right, expr.span),
            ExprKind::Unary { op, operand } => self.lower_unary(*op, operand, expr.span),
            ExprKind::Call { callee, args } => self.lower_call(callee, args, expr.span),
            ExprKind::MemberAccess { object, member } => {
                let ptr = self.field_ptr(object, member, expr.span)?;
                Ok(self.builder.load(&ptr))
            }
            ExprKind::Assignment { target, value } => self.lower_assignment(target, value),
            ExprKind::New { class, args } => self.lower_new(class, args, expr.span),
        }
    }

    fn lower_literal(&mut self, lit: &Literal, span: Span) -> Result<Value, CodegenError> {
        match lit {
            Literal::Int(n) => const_int(*n, span),
            Literal::Float(f) => Ok(Value::const_f64(*f)),
            Literal::String(s) => Ok(self.cx.module.add_string(s)),
            Literal::Bool(b) => Ok(Value::const_bool(*b)),
        }
    }

    fn variable(&self, name: &str, span: Span) -> Result<&Binding, CodegenError> {
        self.scope
            .lookup(name)
            .ok_or_else(|| CodegenError::UndefinedVariable {
                name: name.to_string(),
                span,
            })
    }

    /// Address of `object.member`.
    pub(crate) fn field_ptr(
        &mut self,
        object: &Expr,
        member: &str,
        span: Span,
    ) -> Result<Value, CodegenError> {
        let obj = self.lower_expr(object)?;
        let Some(class) = obj.ty.class_name() else {
            return Err(CodegenError::NotAnObject {
                ty: obj.ty.source_name(),
                span: object.span,
            });
        };

        let (index, field_ty) = self
            .cx
            .layouts
            .get(class)
            .and_then(|layout| layout.field(member))
            .map(|(index, field)| (index, field.ty.clone()))
            .ok_or_else(|| CodegenError::UndefinedMember {
                class: class.to_string(),
                member: member.to_string(),
                span,
            })?;

        Ok(self.builder.struct_gep(&obj, index, &field_ty))
    }

    /// `target = value`; evaluates to the stored value.
    fn lower_assignment(&mut self, target: &Expr, value: &Expr) -> Result<Value, CodegenError> {
        let (ptr, ty) = match &target.kind {
            ExprKind::Identifier(name) => {
                let binding = self.variable(name, target.span)?;
                if !binding.mutable {
                    return Err(CodegenError::AssignToConstant {
                        name: name.clone(),
                        span: target.span,
                    });
                }
                (binding.ptr.clone(), binding.ty.clone())
            }
            ExprKind::MemberAccess { object, member } => {
                let ptr = self.field_ptr(object, member, target.span)?;
                let ty = ptr.ty.pointee().cloned().unwrap_or_else(|| ptr.ty.clone());
                (ptr, ty)
            }
            _ => {
                return Err(CodegenError::InvalidOperand {
                    op: "=",
                    ty: "a non-place expression".to_string(),
                    span: target.span,
                })
            }
        };

        let stored = self.lower_expr(value)?;
        expect_type(&ty, &stored.ty, value.span)?;
        self.builder.store(stored.clone(), &ptr);
        Ok(stored)
    }

    fn lower_unary(&mut self, op: UnaryOp, operand: &Expr, span: Span) -> Result<Value, CodegenError> {
        // Fold negative literals so `-2147483648` fits.
        if op == UnaryOp::Neg {
            match &operand.kind {
                ExprKind::Literal(Literal::Int(n)) => return const_int(-*n, span),
                ExprKind::Literal(Literal::Float(f)) => return Ok(Value::const_f64(-*f)),
                _ => {}
            }
        }

        let value = self.lower_expr(operand)?;
        match op {
            UnaryOp::Neg if value.ty == IrType::I32 => {
                Ok(self
                    .builder
                    .binary(BinaryOpcode::Sub, Value::const_i32(0), value))
            }
            UnaryOp::Neg if value.ty == IrType::Double => Ok(self.builder.fneg(value)),
            UnaryOp::Not => match Value::all_ones(&value.ty) {
                Some(mask) => Ok(self.builder.binary(BinaryOpcode::Xor, value, mask)),
                None => Err(CodegenError::InvalidOperand {
                    op: op.as_symbol(),
                    ty: value.ty.source_name(),
                    span,
                }),
            },
            UnaryOp::Neg => Err(CodegenError::InvalidOperand {
                op: op.as_symbol(),
                ty: value.ty.source_name(),
                span,
            }),
        }
    }
}

/// An `i32` constant, or `UnsupportedLiteral` if `n` does not fit.
fn const_int(n: i64, span: Span) -> Result<Value, CodegenError> {
    i32::try_from(n)
        .map(Value::const_i32)
        .map_err(|_| CodegenError::UnsupportedLiteral {
            literal: n.to_string(),
            ty: "int",
            span,
        })
}
