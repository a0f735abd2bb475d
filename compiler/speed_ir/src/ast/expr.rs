//! Expression nodes.

use crate::Span;

use super::{BinaryOp, UnaryOp};

/// An expression with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Whether this expression can appear on the left of `=`.
    pub fn is_place(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Identifier(_) | ExprKind::MemberAccess { .. }
        )
    }
}

/// Children are moved onto a heap worklist before the node itself is
/// dropped, so freeing a deeply nested tree does not recurse.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.kind.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.kind.take_children(&mut pending);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),

    /// Variable reference: `x`
    Identifier(String),

    /// Binary operation: `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation: `op operand`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Call: `callee(args)`; a member-access callee is a method call.
    Call { callee: Box<Expr>, args: Vec<Expr> },

    /// Field read: `object.member`
    MemberAccess { object: Box<Expr>, member: String },

    /// Store: `target = value`, where `target` is a place expression.
    Assignment { target: Box<Expr>, value: Box<Expr> },

    /// Object construction: `new Class(args)`
    New { class: String, args: Vec<Expr> },
}

impl ExprKind {
    /// Move every child expression into `out`, leaving leaves behind.
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        fn take(slot: &mut Expr) -> Expr {
            std::mem::replace(slot, Expr::new(ExprKind::Literal(Literal::Bool(false)), Span::DUMMY))
        }

        match self {
            ExprKind::Literal(_) | ExprKind::Identifier(_) => {}
            ExprKind::Binary { left, right, .. } => {
                out.push(take(left));
                out.push(take(right));
            }
            ExprKind::Unary { operand, .. } => out.push(take(operand)),
            ExprKind::MemberAccess { object, .. } => out.push(take(object)),
            ExprKind::Assignment { target, value } => {
                out.push(take(target));
                out.push(take(value));
            }
            ExprKind::Call { callee, args } => {
                out.push(take(callee));
                out.append(args);
            }
            ExprKind::New { args, .. } => out.append(args),
        }
    }
}

/// Literal values.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
}
