//! Top-level items: imports, functions, classes, and type annotations.

use speed_ir::ast::{
    ClassDeclaration, ClassMember, FunctionDeclaration, ImportItem, ImportStatement, Parameter,
    Type, TypeKind, VariableDeclaration,
};
use speed_ir::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `import { a, b } from "module"` with an optional trailing `;`.
    pub(crate) fn parse_import(&mut self) -> Result<ImportStatement, ParseError> {
        self.expect(&TokenKind::Import)?;
        self.expect(&TokenKind::LBrace)?;

        let mut items = Vec::new();
        loop {
            let (name, span) = self.expect_ident()?;
            items.push(ImportItem { name, span });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        self.expect(&TokenKind::From)?;

        let module = match self.current_kind() {
            TokenKind::String(module) => module.clone(),
            _ => return Err(ParseError::unexpected("module name string", self.current())),
        };
        self.advance();
        self.eat(&TokenKind::Semicolon);

        Ok(ImportStatement { items, module })
    }

    /// `fn name(params) [: type] { body }`; an omitted return type is `void`.
    pub(crate) fn parse_function(&mut self) -> Result<FunctionDeclaration, ParseError> {
        let start = self.expect(&TokenKind::Fn)?.span;
        let (name, _) = self.expect_ident()?;

        self.expect(&TokenKind::LParen)?;
        let params = self.parse_params()?;
        let close = self.expect(&TokenKind::RParen)?.span;

        let return_type = if self.eat(&TokenKind::Colon) {
            self.parse_type()?
        } else {
            Type::void(close)
        };

        let body = self.parse_block()?;

        Ok(FunctionDeclaration {
            name,
            params,
            return_type,
            body,
            span: start.merge(self.previous_span()),
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Parameter>, ParseError> {
        let mut params = Vec::new();
        if self.check(&TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            let (name, name_span) = self.expect_ident()?;
            self.expect(&TokenKind::Colon)?;
            let ty = self.parse_type()?;
            params.push(Parameter {
                name,
                span: name_span.merge(ty.span),
                ty,
            });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    /// `class Name { field: type; fn method(...) { ... } }`
    pub(crate) fn parse_class(&mut self) -> Result<ClassDeclaration, ParseError> {
        let start = self.expect(&TokenKind::Class)?.span;
        let (name, _) = self.expect_ident()?;
        self.expect(&TokenKind::LBrace)?;

        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let member = match self.current_kind() {
                TokenKind::Fn => ClassMember::Method(self.parse_function()?),
                TokenKind::Ident(_) => ClassMember::Field(self.parse_field()?),
                _ => {
                    return Err(ParseError::unexpected(
                        "field or method declaration",
                        self.current(),
                    ))
                }
            };
            members.push(member);
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(ClassDeclaration {
            name,
            members,
            span: start.merge(self.previous_span()),
        })
    }

    /// `name: type;` inside a class body.
    fn parse_field(&mut self) -> Result<VariableDeclaration, ParseError> {
        let (name, start) = self.expect_ident()?;
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.expect(&TokenKind::Semicolon)?;

        Ok(VariableDeclaration {
            name,
            ty: Some(ty),
            initializer: None,
            mutable: true,
            span: start.merge(self.previous_span()),
        })
    }

    /// A type name: a builtin type keyword or a class name.
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        let kind = match self.current_kind() {
            TokenKind::IntType => TypeKind::Int,
            TokenKind::FloatType => TypeKind::Float,
            TokenKind::StringType => TypeKind::String,
            TokenKind::BoolType => TypeKind::Bool,
            TokenKind::VoidType => TypeKind::Void,
            TokenKind::AnyType => TypeKind::Any,
            TokenKind::Ident(name) => TypeKind::Named(name.clone()),
            _ => return Err(ParseError::unexpected("type", self.current())),
        };
        let span = self.advance().span;
        Ok(Type::new(kind, span))
    }
}
