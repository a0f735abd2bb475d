//! Expression parsing.
//!
//! # Module Structure
//!
//! - `mod.rs`: Entry point (`parse_expr`) and binary operator precedence chain
//! - `operators.rs`: Operator matching helpers
//! - `postfix.rs`: Call, field access, method call
//! - `primary.rs`: Literals, identifiers, `new`, parentheses

mod operators;
mod postfix;
mod primary;

use speed_ir::ast::{BinaryOp, Expr, ExprKind};
use speed_ir::TokenKind;

use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression, including assignment at the top level.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner())
    }

    /// `target = value` (right-associative) or a binary expression.
    fn parse_expr_inner(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_binary_or()?;

        if self.check(&TokenKind::Eq) {
            let eq = self.advance();
            if !left.is_place() {
                return Err(ParseError::invalid_assignment_target(left.span, eq));
            }
            let value = self.parse_expr()?;
            let span = left.span.merge(value.span);
            return Ok(Expr::new(
                ExprKind::Assignment {
                    target: Box::new(left),
                    value: Box::new(value),
                },
                span,
            ));
        }

        Ok(left)
    }

    /// `||` (lowest precedence binary).
    fn parse_binary_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_binary_and()?;
        while self.check(&TokenKind::PipePipe) {
            self.advance();
            let right = self.parse_binary_and()?;
            left = make_binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    /// `&&`
    fn parse_binary_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;
        while self.check(&TokenKind::AmpAmp) {
            self.advance();
            let right = self.parse_equality()?;
            left = make_binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    /// `==` `!=`
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        while let Some(op) = self.match_equality_op() {
            self.advance();
            let right = self.parse_comparison()?;
            left = make_binary(op, left, right);
        }
        Ok(left)
    }

    /// `<` `>` `<=` `>=`
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_comparison_op() {
            self.advance();
            let right = self.parse_additive()?;
            left = make_binary(op, left, right);
        }
        Ok(left)
    }

    /// `+` `-`
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = make_binary(op, left, right);
        }
        Ok(left)
    }

    /// `*` `/` `%`
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_unary()?;
            left = make_binary(op, left, right);
        }
        Ok(left)
    }

    /// `!x`, `-x`
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.match_unary_op() {
            let start = self.advance().span;
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        self.parse_postfix()
    }
}

fn make_binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}
