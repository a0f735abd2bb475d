//! Binary operator lowering.
//!
//! The instruction family is picked from the static IR type of the left
//! operand; the right operand must have the same type.
//!
//! | Left type | Arithmetic | Comparison | Logical |
//! |-----------|------------|------------|---------|
//! | `i32` | `add sub mul sdiv srem` | `icmp eq ne slt sgt sle sge` | no |
//! | `double` | `fadd fsub fmul fdiv frem` | `fcmp oeq one olt ogt ole oge` | no |
//! | `i1` | no | `icmp eq ne` | `and or` |
//!
//! `&&` and `||` evaluate both operands.

use speed_ir::ast::{BinaryOp, Expr};
use speed_ir::Span;

use crate::ir::{BinaryOpcode, FloatPredicate, IntPredicate, IrType, Value};
use crate::CodegenError;

use super::function::FunctionLowerer;

impl FunctionLowerer<'_> {
    pub(crate) fn lower_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        span: Span,
    ) -> Result<Value, CodegenError> {
        let lhs = self.lower_expr(left)?;
        let rhs = self.lower_expr(right)?;

        let invalid = |ty: &IrType| CodegenError::InvalidOperand {
            op: op.as_symbol(),
            ty: ty.source_name(),
            span,
        };

        if !matches!(lhs.ty, IrType::I32 | IrType::Double | IrType::I1) {
            return Err(invalid(&lhs.ty));
        }
        if rhs.ty != lhs.ty {
            return Err(CodegenError::TypeMismatch {
                expected: lhs.ty.source_name(),
                found: rhs.ty.source_name(),
                span: right.span,
            });
        }

        let value = match lhs.ty {
            IrType::I32 => {
                if let Some(opcode) = int_opcode(op) {
                    self.builder.binary(opcode, lhs, rhs)
                } else if let Some(pred) = int_predicate(op) {
                    self.builder.icmp(pred, lhs, rhs)
                } else {
                    return Err(invalid(&lhs.ty));
                }
            }
            IrType::Double => {
                if let Some(opcode) = float_opcode(op) {
                    self.builder.binary(opcode, lhs, rhs)
                } else if let Some(pred) = float_predicate(op) {
                    self.builder.fcmp(pred, lhs, rhs)
                } else {
                    return Err(invalid(&lhs.ty));
                }
            }
            _ => match op {
                BinaryOp::And => self.builder.binary(BinaryOpcode::And, lhs, rhs),
                BinaryOp::Or => self.builder.binary(BinaryOpcode::Or, lhs, rhs),
                BinaryOp::Eq => self.builder.icmp(IntPredicate::Eq, lhs, rhs),
                BinaryOp::NotEq => self.builder.icmp(IntPredicate::Ne, lhs, rhs),
                _ => return Err(invalid(&lhs.ty)),
            },
        };
        Ok(value)
    }
}

const fn int_opcode(op: BinaryOp) -> Option<BinaryOpcode> {
    match op {
        BinaryOp::Add => Some(BinaryOpcode::Add),
        BinaryOp::Sub => Some(BinaryOpcode::Sub),
        BinaryOp::Mul => Some(BinaryOpcode::Mul),
        BinaryOp::Div => Some(BinaryOpcode::SDiv),
        BinaryOp::Mod => Some(BinaryOpcode::SRem),
        _ => None,
    }
}

const fn int_predicate(op: BinaryOp) -> Option<IntPredicate> {
    match op {
        BinaryOp::Eq => Some(IntPredicate::Eq),
        BinaryOp::NotEq => Some(IntPredicate::Ne),
        BinaryOp::Lt => Some(IntPredicate::Slt),
        BinaryOp::Gt => Some(IntPredicate::Sgt),
        BinaryOp::LtEq => Some(IntPredicate::Sle),
        BinaryOp::GtEq => Some(IntPredicate::Sge),
        _ => None,
    }
}

const fn float_opcode(op: BinaryOp) -> Option<BinaryOpcode> {
    match op {
        BinaryOp::Add => Some(BinaryOpcode::FAdd),
        BinaryOp::Sub => Some(BinaryOpcode::FSub),
        BinaryOp::Mul => Some(BinaryOpcode::FMul),
        BinaryOp::Div => Some(BinaryOpcode::FDiv),
        BinaryOp::Mod => Some(BinaryOpcode::FRem),
        _ => None,
    }
}

const fn float_predicate(op: BinaryOp) -> Option<FloatPredicate> {
    match op {
        BinaryOp::Eq => Some(FloatPredicate::Oeq),
        BinaryOp::NotEq => Some(FloatPredicate::One),
        BinaryOp::Lt => Some(FloatPredicate::Olt),
        BinaryOp::Gt => Some(FloatPredicate::Ogt),
        BinaryOp::LtEq => Some(FloatPredicate::Ole),
        BinaryOp::GtEq => Some(FloatPredicate::Oge),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BinaryOp; 13] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Gt,
        BinaryOp::GtEq,
        BinaryOp::And,
        BinaryOp::Or,
    ];

    #[test]
    fn test_numeric_ops_map_to_exactly_one_family_member() {
        for op in ALL {
            let int = usize::from(int_opcode(op).is_some()) + usize::from(int_predicate(op).is_some());
            let float =
                usize::from(float_opcode(op).is_some()) + usize::from(float_predicate(op).is_some());
            let expected = usize::from(!matches!(op, BinaryOp::And | BinaryOp::Or));
            assert_eq!(int, expected, "{op}");
            assert_eq!(float, expected, "{op}");
        }
    }

    #[test]
    fn test_comparisons_are_signed_and_ordered() {
        assert_eq!(int_predicate(BinaryOp::Lt), Some(IntPredicate::Slt));
        assert_eq!(float_predicate(BinaryOp::GtEq), Some(FloatPredicate::Oge));
        assert_eq!(int_opcode(BinaryOp::Mod), Some(BinaryOpcode::SRem));
    }
}
