//! Primary expressions: literals, identifiers, `new`, parentheses.

use speed_ir::ast::{Expr, ExprKind, Literal};
use speed_ir::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current();
        let kind = match &token.kind {
            TokenKind::Int(n) => ExprKind::Literal(Literal::Int(*n)),
            TokenKind::Float(bits) => ExprKind::Literal(Literal::Float(f64::from_bits(*bits))),
            TokenKind::String(s) => ExprKind::Literal(Literal::String(s.clone())),
            TokenKind::Bool(b) => ExprKind::Literal(Literal::Bool(*b)),
            TokenKind::Ident(name) => ExprKind::Identifier(name.clone()),
            TokenKind::New => return self.parse_new(),
            TokenKind::LParen => return self.parse_parenthesized(),
            _ => return Err(ParseError::expected_expression(token)),
        };
        self.advance();
        Ok(Expr::new(kind, token.span))
    }

    /// `new Class(args)`
    fn parse_new(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::New)?.span;
        let (class, _) = self.expect_ident()?;
        let args = self.parse_call_args()?;
        Ok(Expr::new(
            ExprKind::New { class, args },
            start.merge(self.previous_span()),
        ))
    }

    /// `( expr )`; the result's span includes the parentheses.
    fn parse_parenthesized(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LParen)?.span;
        let mut inner = self.parse_expr()?;
        let end = self.expect(&TokenKind::RParen)?.span;
        inner.span = start.merge(end);
        Ok(inner)
    }
}
