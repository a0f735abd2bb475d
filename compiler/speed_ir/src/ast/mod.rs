//! Abstract syntax tree.
//!
//! The node set is closed: statements are [`StmtKind`] variants and
//! expressions are [`ExprKind`] variants, so every consumer matches
//! exhaustively and a new node kind is a compile error until handled.
//!
//! Children are owned (`Box`/`Vec`); the tree has no sharing and no
//! back-references.

mod expr;
mod operators;
mod stmt;
mod ty;

pub use expr::{Expr, ExprKind, Literal};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{
    ClassDeclaration, ClassMember, ForStatement, FunctionDeclaration, IfStatement, ImportItem,
    ImportStatement, Parameter, ReturnStatement, Stmt, StmtKind, VariableDeclaration,
    WhileStatement,
};
pub use ty::{Type, TypeKind};

/// A parsed source file: its top-level statements in order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDeclaration> {
        self.statements.iter().filter_map(|s| match &s.kind {
            StmtKind::Function(f) => Some(f),
            _ => None,
        })
    }
}
