//! Typed operands.

use std::fmt;

use super::IrType;

/// An operand: a static IR type plus how to spell it.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    pub ty: IrType,
    pub operand: Operand,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// `%name`
    Reg(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// `@name`
    Global(String),
    /// Address of the first byte of a string constant `@name` of `len` bytes.
    StringPtr { global: String, len: u32 },
    /// Result of a `void` call; never printed.
    Void,
}

impl Value {
    pub fn new(ty: IrType, operand: Operand) -> Self {
        Value { ty, operand }
    }

    pub fn reg(ty: IrType, name: impl Into<String>) -> Self {
        Value::new(ty, Operand::Reg(name.into()))
    }

    pub fn const_i32(n: i32) -> Self {
        Value::new(IrType::I32, Operand::Int(i64::from(n)))
    }

    pub fn const_f64(f: f64) -> Self {
        Value::new(IrType::Double, Operand::Float(f))
    }

    pub fn const_bool(b: bool) -> Self {
        Value::new(IrType::I1, Operand::Bool(b))
    }

    pub fn null(ty: IrType) -> Self {
        Value::new(ty, Operand::Null)
    }

    pub fn void() -> Self {
        Value::new(IrType::Void, Operand::Void)
    }

    /// All bits set: the `xor` mask for logical and bitwise not.
    pub fn all_ones(ty: &IrType) -> Option<Self> {
        match ty {
            IrType::I1 => Some(Value::const_bool(true)),
            IrType::I32 => Some(Value::const_i32(-1)),
            _ => None,
        }
    }

    /// The value an implicit return produces for `ty`; `None` for `void`.
    pub fn zero(ty: &IrType) -> Option<Self> {
        match ty {
            IrType::Void => None,
            IrType::I1 => Some(Value::const_bool(false)),
            IrType::Double => Some(Value::const_f64(0.0)),
            IrType::Ptr(_) => Some(Value::null(ty.clone())),
            _ => Some(Value::new(ty.clone(), Operand::Int(0))),
        }
    }

    /// `i32 %x`: the type followed by the operand.
    pub fn typed(&self) -> Typed<'_> {
        Typed(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Operand::Reg(name) => write!(f, "%{name}"),
            Operand::Int(n) => write!(f, "{n}"),
            // Hex is exact for every double, including non-finite ones.
            Operand::Float(x) => write!(f, "0x{:016X}", x.to_bits()),
            Operand::Bool(b) => write!(f, "{b}"),
            Operand::Null => f.write_str("null"),
            Operand::Global(name) => write!(f, "@{name}"),
            Operand::StringPtr { global, len } => write!(
                f,
                "getelementptr inbounds ([{len} x i8], [{len} x i8]* @{global}, i32 0, i32 0)"
            ),
            Operand::Void => f.write_str("void"),
        }
    }
}

pub struct Typed<'a>(&'a Value);

impl fmt::Display for Typed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.ty, self.0)
    }
}
