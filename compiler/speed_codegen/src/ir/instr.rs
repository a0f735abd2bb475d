//! Instructions, terminators, and basic blocks.

use std::fmt;

use super::{IrType, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOpcode {
    Add,
    Sub,
    Mul,
    SDiv,
    SRem,
    FAdd,
    FSub,
    FMul,
    FDiv,
    FRem,
    And,
    Or,
    Xor,
}

impl BinaryOpcode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::SDiv => "sdiv",
            Self::SRem => "srem",
            Self::FAdd => "fadd",
            Self::FSub => "fsub",
            Self::FMul => "fmul",
            Self::FDiv => "fdiv",
            Self::FRem => "frem",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
        }
    }
}

/// Signed integer comparison predicates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntPredicate {
    Eq,
    Ne,
    Slt,
    Sgt,
    Sle,
    Sge,
}

impl IntPredicate {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Slt => "slt",
            Self::Sgt => "sgt",
            Self::Sle => "sle",
            Self::Sge => "sge",
        }
    }
}

/// Ordered floating-point comparison predicates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FloatPredicate {
    Oeq,
    One,
    Olt,
    Ogt,
    Ole,
    Oge,
}

impl FloatPredicate {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oeq => "oeq",
            Self::One => "one",
            Self::Olt => "olt",
            Self::Ogt => "ogt",
            Self::Ole => "ole",
            Self::Oge => "oge",
        }
    }
}

/// A non-terminator instruction. `dst` names the result register.
#[derive(Clone, Debug, PartialEq)]
pub enum Instr {
    Alloca {
        dst: String,
        ty: IrType,
    },
    Load {
        dst: String,
        ty: IrType,
        ptr: Value,
    },
    Store {
        value: Value,
        ptr: Value,
    },
    Binary {
        dst: String,
        op: BinaryOpcode,
        lhs: Value,
        rhs: Value,
    },
    ICmp {
        dst: String,
        pred: IntPredicate,
        lhs: Value,
        rhs: Value,
    },
    FCmp {
        dst: String,
        pred: FloatPredicate,
        lhs: Value,
        rhs: Value,
    },
    FNeg {
        dst: String,
        operand: Value,
    },
    /// `getelementptr inbounds` over `base_ty` at `ptr`.
    Gep {
        dst: String,
        base_ty: IrType,
        ptr: Value,
        indices: Vec<Value>,
    },
    /// `dst` is `None` for calls returning `void`.
    Call {
        dst: Option<String>,
        ret: IrType,
        callee: String,
        args: Vec<Value>,
    },
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Alloca { dst, ty } => write!(f, "%{dst} = alloca {ty}"),
            Instr::Load { dst, ty, ptr } => {
                write!(f, "%{dst} = load {ty}, {}", ptr.typed())
            }
            Instr::Store { value, ptr } => {
                write!(f, "store {}, {}", value.typed(), ptr.typed())
            }
            Instr::Binary { dst, op, lhs, rhs } => {
                write!(f, "%{dst} = {} {}, {rhs}", op.as_str(), lhs.typed())
            }
            Instr::ICmp {
                dst,
                pred,
                lhs,
                rhs,
            } => write!(f, "%{dst} = icmp {} {}, {rhs}", pred.as_str(), lhs.typed()),
            Instr::FCmp {
                dst,
                pred,
                lhs,
                rhs,
            } => write!(f, "%{dst} = fcmp {} {}, {rhs}", pred.as_str(), lhs.typed()),
            Instr::FNeg { dst, operand } => write!(f, "%{dst} = fneg {}", operand.typed()),
            Instr::Gep {
                dst,
                base_ty,
                ptr,
                indices,
            } => {
                write!(f, "%{dst} = getelementptr inbounds {base_ty}, {}", ptr.typed())?;
                for index in indices {
                    write!(f, ", {}", index.typed())?;
                }
                Ok(())
            }
            Instr::Call {
                dst,
                ret,
                callee,
                args,
            } => {
                if let Some(dst) = dst {
                    write!(f, "%{dst} = ")?;
                }
                write!(f, "call {ret} @{callee}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg.typed())?;
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Terminator {
    /// `ret T v`, or `ret void` when `None`.
    Ret(Option<Value>),
    Br(String),
    CondBr {
        cond: Value,
        then_label: String,
        else_label: String,
    },
    Unreachable,
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Ret(Some(value)) => write!(f, "ret {}", value.typed()),
            Terminator::Ret(None) => f.write_str("ret void"),
            Terminator::Br(label) => write!(f, "br label %{label}"),
            Terminator::CondBr {
                cond,
                then_label,
                else_label,
            } => write!(
                f,
                "br {}, label %{then_label}, label %{else_label}",
                cond.typed()
            ),
            Terminator::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Straight-line instructions ending in one terminator.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicBlock {
    pub label: String,
    pub instrs: Vec<Instr>,
    /// `None` only while the block is still being built.
    pub terminator: Option<Terminator>,
}

impl BasicBlock {
    pub fn new(label: impl Into<String>) -> Self {
        BasicBlock {
            label: label.into(),
            instrs: Vec::new(),
            terminator: None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminator.is_some()
    }
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        for instr in &self.instrs {
            writeln!(f, "  {instr}")?;
        }
        match &self.terminator {
            Some(term) => writeln!(f, "  {term}"),
            None => writeln!(f, "  unreachable"),
        }
    }
}
