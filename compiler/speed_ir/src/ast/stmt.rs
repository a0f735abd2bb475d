//! Statement and declaration nodes.

use crate::Span;

use super::{Expr, Type};

/// A statement with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Import(ImportStatement),
    Function(FunctionDeclaration),
    Class(ClassDeclaration),
    Variable(VariableDeclaration),
    Return(ReturnStatement),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    /// Expression evaluated for its effect: `expr;`
    Expr(Expr),
}

impl StmtKind {
    /// Short description used in "not allowed here" diagnostics.
    pub const fn describe(&self) -> &'static str {
        match self {
            StmtKind::Import(_) => "import statement",
            StmtKind::Function(_) => "function declaration",
            StmtKind::Class(_) => "class declaration",
            StmtKind::Variable(_) => "variable declaration",
            StmtKind::Return(_) => "return statement",
            StmtKind::If(_) => "if statement",
            StmtKind::While(_) => "while loop",
            StmtKind::For(_) => "for loop",
            StmtKind::Expr(_) => "expression statement",
        }
    }
}

/// `import { a, b } from "module";`
#[derive(Clone, Debug, PartialEq)]
pub struct ImportStatement {
    pub items: Vec<ImportItem>,
    pub module: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportItem {
    pub name: String,
    pub span: Span,
}

/// `fn name(params): ret { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub params: Vec<Parameter>,
    /// `void` when the annotation was omitted.
    pub return_type: Type,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `name: type`
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// `class Name { members }`
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDeclaration {
    pub name: String,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

impl ClassDeclaration {
    pub fn fields(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Field(field) => Some(field),
            ClassMember::Method(_) => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &FunctionDeclaration> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Method(method) => Some(method),
            ClassMember::Field(_) => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassMember {
    /// `name: type;` with no initializer.
    Field(VariableDeclaration),
    Method(FunctionDeclaration),
}

/// `let name[: type] = init;`, `const ...`, or a class field.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    pub ty: Option<Type>,
    /// `None` only for class fields.
    pub initializer: Option<Expr>,
    /// `false` for `const` bindings.
    pub mutable: bool,
    pub span: Span,
}

/// `return [value];`
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expr>,
}

/// `if cond { then } else { else }`
#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_branch: Vec<Stmt>,
    /// `else if` chains nest as a single `If` statement here.
    pub else_branch: Option<Vec<Stmt>>,
}

/// `while cond { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct WhileStatement {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

/// `for (init; cond; step) { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct ForStatement {
    pub init: VariableDeclaration,
    pub condition: Expr,
    pub step: Expr,
    pub body: Vec<Stmt>,
}
