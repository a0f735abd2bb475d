//! Statements and blocks.

use speed_ir::ast::{
    ForStatement, IfStatement, ReturnStatement, Stmt, StmtKind, VariableDeclaration,
    WhileStatement,
};
use speed_ir::TokenKind;

use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse one statement, dispatching on its leading token.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Import => StmtKind::Import(self.parse_import()?),
            TokenKind::Fn => StmtKind::Function(self.parse_function()?),
            TokenKind::Class => StmtKind::Class(self.parse_class()?),
            TokenKind::Let | TokenKind::Const => StmtKind::Variable(self.parse_variable()?),
            TokenKind::Return => StmtKind::Return(self.parse_return()?),
            TokenKind::If => StmtKind::If(self.parse_if()?),
            TokenKind::While => StmtKind::While(self.parse_while()?),
            TokenKind::For => StmtKind::For(self.parse_for()?),
            _ => {
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::Semicolon)?;
                StmtKind::Expr(expr)
            }
        };
        Ok(Stmt::new(kind, start.merge(self.previous_span())))
    }

    /// `{ statements }`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.is_at_end() {
                return Err(ParseError::unexpected("`}`", self.current()));
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(statements)
    }

    /// `let name[: type] = init;` or `const name[: type] = init;`
    pub(crate) fn parse_variable(&mut self) -> Result<VariableDeclaration, ParseError> {
        let start = self.current_span();
        let mutable = match self.current_kind() {
            TokenKind::Let => true,
            TokenKind::Const => false,
            _ => return Err(ParseError::unexpected("`let` or `const`", self.current())),
        };
        self.advance();

        let (name, _) = self.expect_ident()?;
        let ty = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.expect(&TokenKind::Eq)?;
        let initializer = self.parse_expr()?;
        self.expect(&TokenKind::Semicolon)?;

        Ok(VariableDeclaration {
            name,
            ty,
            initializer: Some(initializer),
            mutable,
            span: start.merge(self.previous_span()),
        })
    }

    /// `return;` or `return expr;`
    fn parse_return(&mut self) -> Result<ReturnStatement, ParseError> {
        self.expect(&TokenKind::Return)?;
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon)?;
        Ok(ReturnStatement { value })
    }

    /// `if cond { ... } [else { ... } | else if ...]`
    ///
    /// The else clause always belongs to the nearest `if`.
    fn parse_if(&mut self) -> Result<IfStatement, ParseError> {
        self.expect(&TokenKind::If)?;
        let condition = self.parse_expr()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.eat(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                let start = self.current_span();
                let nested = self.parse_if()?;
                Some(vec![Stmt::new(
                    StmtKind::If(nested),
                    start.merge(self.previous_span()),
                )])
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(IfStatement {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// `while cond { ... }`
    fn parse_while(&mut self) -> Result<WhileStatement, ParseError> {
        self.expect(&TokenKind::While)?;
        let condition = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(WhileStatement { condition, body })
    }

    /// `for (let i = 0; cond; step) { ... }`
    fn parse_for(&mut self) -> Result<ForStatement, ParseError> {
        self.expect(&TokenKind::For)?;
        self.expect(&TokenKind::LParen)?;
        let init = self.parse_variable()?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::Semicolon)?;
        let step = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(ForStatement {
            init,
            condition,
            step,
            body,
        })
    }
}
