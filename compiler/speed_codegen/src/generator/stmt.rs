//! Statements and control flow.

use speed_ir::ast::{
    Expr, ForStatement, IfStatement, ReturnStatement, Stmt, StmtKind, VariableDeclaration,
    WhileStatement,
};
use speed_ir::Span;

use crate::ir::{FloatPredicate, IntPredicate, IrType, Value};
use crate::scope::Binding;
use crate::stack::ensure_sufficient_stack;
use crate::CodegenError;

use super::expect_type;
use super::function::FunctionLowerer;

impl FunctionLowerer<'_> {
    /// Nested `if`/`while`/`for` bodies recurse through here.
    pub(crate) fn lower_stmt(&mut self, stmt: &Stmt) -> Result<(), CodegenError> {
        ensure_sufficient_stack(|| self.lower_stmt_inner(stmt))
    }

    fn lower_stmt_inner(&mut self, stmt: &Stmt) -> Result<(), CodegenError> {
        // Code after `return` still gets checked; it lands in a block
        // nothing branches to.
        if self.builder.is_terminated() {
            let dead = self.builder.append_block("dead");
            self.builder.position_at_end(dead);
        }

        match &stmt.kind {
            StmtKind::Variable(decl) => self.lower_variable(decl),
            StmtKind::Return(ret) => self.lower_return(ret, stmt.span),
            StmtKind::If(stmt) => self.lower_if(stmt),
            StmtKind::While(stmt) => self.lower_while(stmt),
            StmtKind::For(stmt) => self.lower_for(stmt),
            StmtKind::Expr(expr) => self.lower_expr(expr).map(drop),
            StmtKind::Import(_) | StmtKind::Function(_) | StmtKind::Class(_) => {
                Err(CodegenError::MisplacedStatement {
                    what: stmt.kind.describe(),
                    context: "inside a function body",
                    span: stmt.span,
                })
            }
        }
    }

    /// Statements of a nested block, in a child scope.
    fn lower_block(&mut self, stmts: &[Stmt]) -> Result<(), CodegenError> {
        self.in_child_scope(|this| {
            for stmt in stmts {
                this.lower_stmt(stmt)?;
            }
            Ok(())
        })
    }

    pub(crate) fn lower_variable(&mut self, decl: &VariableDeclaration) -> Result<(), CodegenError> {
        let Some(init) = &decl.initializer else {
            return Ok(());
        };
        let value = self.lower_expr(init)?;

        let ty = if let Some(annotation) = &decl.ty {
            let ty = self.cx.lower_value_type(annotation)?;
            expect_type(&ty, &value.ty, init.span)?;
            ty
        } else if value.ty.is_void() {
            return Err(CodegenError::TypeMismatch {
                expected: "a value".to_string(),
                found: "void".to_string(),
                span: init.span,
            });
        } else {
            value.ty.clone()
        };

        let slot = self
            .builder
            .entry_alloca(&format!("{}.addr", decl.name), ty.clone());
        self.builder.store(value, &slot);
        self.scope.bind(
            decl.name.clone(),
            Binding {
                ptr: slot,
                ty,
                mutable: decl.mutable,
            },
        );
        Ok(())
    }

    fn lower_return(&mut self, ret: &ReturnStatement, span: Span) -> Result<(), CodegenError> {
        match &ret.value {
            Some(expr) => {
                let value = self.lower_expr(expr)?;
                expect_type(&self.return_ty, &value.ty, expr.span)?;
                if value.ty.is_void() {
                    self.builder.ret_void();
                } else {
                    self.builder.ret(value);
                }
            }
            None => {
                expect_type(&self.return_ty, &IrType::Void, span)?;
                self.builder.ret_void();
            }
        }
        Ok(())
    }

    fn lower_if(&mut self, stmt: &IfStatement) -> Result<(), CodegenError> {
        let cond = self.lower_condition(&stmt.condition)?;

        let id = self.builder.next_label_id();
        let then_bb = self.builder.append_block(&format!("if.then{id}"));
        let else_bb = stmt
            .else_branch
            .as_ref()
            .map(|_| self.builder.append_block(&format!("if.else{id}")));
        let end_bb = self.builder.append_block(&format!("if.end{id}"));

        self.builder
            .cond_br(cond, then_bb, else_bb.unwrap_or(end_bb));

        self.builder.position_at_end(then_bb);
        self.lower_block(&stmt.then_branch)?;
        self.builder.br(end_bb);

        if let (Some(else_bb), Some(else_branch)) = (else_bb, &stmt.else_branch) {
            self.builder.position_at_end(else_bb);
            self.lower_block(else_branch)?;
            self.builder.br(end_bb);
        }

        self.builder.position_at_end(end_bb);
        Ok(())
    }

    fn lower_while(&mut self, stmt: &WhileStatement) -> Result<(), CodegenError> {
        let id = self.builder.next_label_id();
        let cond_bb = self.builder.append_block(&format!("while.cond{id}"));
        let body_bb = self.builder.append_block(&format!("while.body{id}"));
        let end_bb = self.builder.append_block(&format!("while.end{id}"));

        self.builder.br(cond_bb);
        self.builder.position_at_end(cond_bb);
        let cond = self.lower_condition(&stmt.condition)?;
        self.builder.cond_br(cond, body_bb, end_bb);

        self.builder.position_at_end(body_bb);
        self.lower_block(&stmt.body)?;
        self.builder.br(cond_bb);

        self.builder.position_at_end(end_bb);
        Ok(())
    }

    /// The loop variable lives in a scope around the whole loop; the body
    /// gets its own child of that.
    fn lower_for(&mut self, stmt: &ForStatement) -> Result<(), CodegenError> {
        self.in_child_scope(|this| {
            this.lower_variable(&stmt.init)?;

            let id = this.builder.next_label_id();
            let cond_bb = this.builder.append_block(&format!("for.cond{id}"));
            let body_bb = this.builder.append_block(&format!("for.body{id}"));
            let step_bb = this.builder.append_block(&format!("for.step{id}"));
            let end_bb = this.builder.append_block(&format!("for.end{id}"));

            this.builder.br(cond_bb);
            this.builder.position_at_end(cond_bb);
            let cond = this.lower_condition(&stmt.condition)?;
            this.builder.cond_br(cond, body_bb, end_bb);

            this.builder.position_at_end(body_bb);
            this.lower_block(&stmt.body)?;
            this.builder.br(step_bb);

            this.builder.position_at_end(step_bb);
            this.lower_expr(&stmt.step)?;
            this.builder.br(cond_bb);

            this.builder.position_at_end(end_bb);
            Ok(())
        })
    }

    /// An `i1` for a branch: `bool` as is, numbers compared against zero.
    fn lower_condition(&mut self, expr: &Expr) -> Result<Value, CodegenError> {
        let value = self.lower_expr(expr)?;
        match value.ty {
            IrType::I1 => Ok(value),
            IrType::I32 => Ok(self
                .builder
                .icmp(IntPredicate::Ne, value, Value::const_i32(0))),
            IrType::Double => Ok(self
                .builder
                .fcmp(FloatPredicate::One, value, Value::const_f64(0.0))),
            _ => Err(CodegenError::TypeMismatch {
                expected: "bool".to_string(),
                found: value.ty.source_name(),
                span: expr.span,
            }),
        }
    }
}
