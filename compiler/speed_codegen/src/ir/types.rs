//! IR types.

use std::fmt;

/// A first-class IR type, printed in LLVM typed-pointer syntax.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IrType {
    Void,
    /// `i1`, the type of `bool` and of comparison results.
    I1,
    I8,
    I32,
    Double,
    Ptr(Box<IrType>),
    /// `[N x T]`, only used for string constants.
    Array(u32, Box<IrType>),
    /// `%struct.Name`, a class layout by name.
    Struct(String),
}

impl IrType {
    /// `i8*`: strings and `any`.
    pub fn i8_ptr() -> Self {
        IrType::I8.ptr_to()
    }

    #[must_use]
    pub fn ptr_to(self) -> Self {
        IrType::Ptr(Box::new(self))
    }

    /// `%struct.Name*`, the type of an object reference.
    pub fn object(class: impl Into<String>) -> Self {
        IrType::Struct(class.into()).ptr_to()
    }

    pub fn pointee(&self) -> Option<&IrType> {
        match self {
            IrType::Ptr(inner) => Some(inner),
            _ => None,
        }
    }

    /// Class name if this is an object reference.
    pub fn class_name(&self) -> Option<&str> {
        match self.pointee() {
            Some(IrType::Struct(name)) => Some(name),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, IrType::Void)
    }

    /// How the type is spelled in Speed source, for diagnostics.
    pub fn source_name(&self) -> String {
        match self {
            IrType::Void => "void".to_string(),
            IrType::I1 => "bool".to_string(),
            IrType::I32 => "int".to_string(),
            IrType::Double => "float".to_string(),
            IrType::Ptr(inner) if **inner == IrType::I8 => "string".to_string(),
            IrType::Ptr(inner) => match &**inner {
                IrType::Struct(name) => name.clone(),
                other => format!("{other}*"),
            },
            other => other.to_string(),
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => f.write_str("void"),
            IrType::I1 => f.write_str("i1"),
            IrType::I8 => f.write_str("i8"),
            IrType::I32 => f.write_str("i32"),
            IrType::Double => f.write_str("double"),
            IrType::Ptr(inner) => write!(f, "{inner}*"),
            IrType::Array(len, elem) => write!(f, "[{len} x {elem}]"),
            IrType::Struct(name) => write!(f, "%struct.{name}"),
        }
    }
}

/// Function type: return type and parameter types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSig {
    pub ret: IrType,
    pub params: Vec<IrType>,
}

impl FunctionSig {
    pub fn new(params: Vec<IrType>, ret: IrType) -> Self {
        FunctionSig { ret, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_syntax() {
        assert_eq!(IrType::i8_ptr().to_string(), "i8*");
        assert_eq!(IrType::object("Point").to_string(), "%struct.Point*");
        assert_eq!(
            IrType::Array(6, Box::new(IrType::I8)).to_string(),
            "[6 x i8]"
        );
        assert_eq!(IrType::Double.ptr_to().ptr_to().to_string(), "double**");
    }

    #[test]
    fn test_source_names() {
        assert_eq!(IrType::I32.source_name(), "int");
        assert_eq!(IrType::I1.source_name(), "bool");
        assert_eq!(IrType::i8_ptr().source_name(), "string");
        assert_eq!(IrType::object("Point").source_name(), "Point");
    }

    #[test]
    fn test_class_name() {
        assert_eq!(IrType::object("Node").class_name(), Some("Node"));
        assert_eq!(IrType::i8_ptr().class_name(), None);
        assert_eq!(IrType::Struct("Node".into()).class_name(), None);
    }
}
