//! Code generation errors.
//!
//! Generation stops at the first error. Every variant carries the span of
//! the offending node so the driver can point at it.

use speed_diagnostic::{Diagnostic, ErrorCode};
use speed_ir::Span;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unknown type `{name}`")]
    UnknownType { name: String, span: Span },

    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String, span: Span },

    #[error("undefined function `{name}`")]
    UndefinedFunction { name: String, span: Span },

    #[error("class `{class}` has no member `{member}`")]
    UndefinedMember {
        class: String,
        member: String,
        span: Span,
    },

    #[error("`{callee}` takes {expected} argument(s) but {found} were supplied")]
    ArgumentCount {
        callee: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("`{name}` is defined more than once")]
    DuplicateDefinition { name: String, span: Span },

    #[error("operator `{op}` cannot be applied to `{ty}`")]
    InvalidOperand {
        op: &'static str,
        ty: String,
        span: Span,
    },

    #[error("cannot assign to constant `{name}`")]
    AssignToConstant { name: String, span: Span },

    #[error("value of type `{ty}` is not an object")]
    NotAnObject { ty: String, span: Span },

    #[error("expression is not callable")]
    NotCallable { span: Span },

    #[error("literal `{literal}` cannot be represented as `{ty}`")]
    UnsupportedLiteral {
        literal: String,
        ty: &'static str,
        span: Span,
    },

    #[error("{what} is not allowed {context}")]
    MisplacedStatement {
        what: &'static str,
        context: &'static str,
        span: Span,
    },
}

impl CodegenError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CodegenError::TypeMismatch { .. } => ErrorCode::E2001,
            CodegenError::UnknownType { .. } => ErrorCode::E2002,
            CodegenError::UndefinedVariable { .. } => ErrorCode::E2003,
            CodegenError::UndefinedFunction { .. } => ErrorCode::E2004,
            CodegenError::UndefinedMember { .. } => ErrorCode::E2005,
            CodegenError::ArgumentCount { .. } => ErrorCode::E2006,
            CodegenError::DuplicateDefinition { .. } => ErrorCode::E2007,
            CodegenError::InvalidOperand { .. } => ErrorCode::E2008,
            CodegenError::AssignToConstant { .. } => ErrorCode::E2009,
            CodegenError::NotAnObject { .. } | CodegenError::NotCallable { .. } => {
                ErrorCode::E2010
            }
            CodegenError::UnsupportedLiteral { .. } => ErrorCode::E5001,
            CodegenError::MisplacedStatement { .. } => ErrorCode::E5002,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CodegenError::TypeMismatch { span, .. }
            | CodegenError::UnknownType { span, .. }
            | CodegenError::UndefinedVariable { span, .. }
            | CodegenError::UndefinedFunction { span, .. }
            | CodegenError::UndefinedMember { span, .. }
            | CodegenError::ArgumentCount { span, .. }
            | CodegenError::DuplicateDefinition { span, .. }
            | CodegenError::InvalidOperand { span, .. }
            | CodegenError::AssignToConstant { span, .. }
            | CodegenError::NotAnObject { span, .. }
            | CodegenError::NotCallable { span }
            | CodegenError::UnsupportedLiteral { span, .. }
            | CodegenError::MisplacedStatement { span, .. } => *span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        let span = self.span();
        match self {
            CodegenError::TypeMismatch { expected, .. } => {
                diag.with_label(span, format!("expected `{expected}`"))
            }
            CodegenError::UnknownType { .. } => diag
                .with_label(span, "not a builtin type or declared class")
                .with_note("builtin types are int, float, string, bool, void, and any"),
            CodegenError::UndefinedVariable { .. } => {
                diag.with_label(span, "not found in this scope")
            }
            CodegenError::UndefinedFunction { name, .. } => diag
                .with_label(span, "no function with this name")
                .with_suggestion(format!(
                    "declare `{name}` or import it from a standard library module"
                )),
            CodegenError::UndefinedMember { .. } => diag.with_label(span, "unknown member"),
            CodegenError::ArgumentCount { expected, .. } => {
                diag.with_label(span, format!("expected {expected} argument(s)"))
            }
            CodegenError::DuplicateDefinition { .. } => diag.with_label(span, "redefined here"),
            CodegenError::InvalidOperand { .. } => diag.with_label(span, "unsupported operand"),
            CodegenError::AssignToConstant { name, .. } => diag
                .with_label(span, "assignment to constant")
                .with_suggestion(format!("declare `{name}` with `let` to make it mutable")),
            CodegenError::NotAnObject { .. } => diag.with_label(span, "not an object"),
            CodegenError::NotCallable { .. } => {
                diag.with_label(span, "only functions and methods can be called")
            }
            CodegenError::UnsupportedLiteral { .. } => {
                diag.with_label(span, "out of range for a 32-bit integer")
            }
            CodegenError::MisplacedStatement { .. } => diag.with_label(span, "not allowed here"),
        }
    }
}
