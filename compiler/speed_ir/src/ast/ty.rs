//! Type annotations as written in source.

use std::fmt;

use crate::Span;

/// A type annotation: `int`, `float`, `Point`, ...
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

impl Type {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        Type { kind, span }
    }

    /// Annotation for an omitted return type.
    pub fn void(span: Span) -> Self {
        Type {
            kind: TypeKind::Void,
            span,
        }
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Int,
    Float,
    String,
    Bool,
    Void,
    Any,
    /// A user-defined class name.
    Named(String),
}

impl TypeKind {
    pub fn name(&self) -> &str {
        match self {
            TypeKind::Int => "int",
            TypeKind::Float => "float",
            TypeKind::String => "string",
            TypeKind::Bool => "bool",
            TypeKind::Void => "void",
            TypeKind::Any => "any",
            TypeKind::Named(name) => name,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
