//! Parse errors.
//!
//! Parsing stops at the first error; there is no recovery, so a compilation
//! reports at most one parse diagnostic.

use speed_diagnostic::{Diagnostic, ErrorCode};
use speed_ir::{Span, Token, TokenKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token that fits no production at this point.
    UnexpectedToken,
    /// An expression was required but the token cannot start one.
    ExpectedExpression,
    /// Left side of `=` is not a variable or field.
    InvalidAssignmentTarget,
}

/// Parse failure at a single token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub span: Span,
    /// Kind of the offending token.
    pub found: TokenKind,
    /// What the parser was looking for, if a single thing.
    pub expected: Option<String>,
}

impl ParseError {
    #[cold]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        let expected = expected.into();
        ParseError {
            kind: ParseErrorKind::UnexpectedToken,
            message: format!("expected {expected}, found {}", describe(&found.kind)),
            span: found.span,
            found: found.kind.clone(),
            expected: Some(expected),
        }
    }

    #[cold]
    pub fn expected_expression(found: &Token) -> Self {
        ParseError {
            kind: ParseErrorKind::ExpectedExpression,
            message: format!("expected expression, found {}", describe(&found.kind)),
            span: found.span,
            found: found.kind.clone(),
            expected: Some("expression".to_string()),
        }
    }

    #[cold]
    pub fn invalid_assignment_target(target: Span, eq: &Token) -> Self {
        ParseError {
            kind: ParseErrorKind::InvalidAssignmentTarget,
            message: "invalid assignment target: only variables and fields can be assigned"
                .to_string(),
            span: target,
            found: eq.kind.clone(),
            expected: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnexpectedToken => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression => ErrorCode::E1002,
            ParseErrorKind::InvalidAssignmentTarget => ErrorCode::E1003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match (self.kind, &self.expected) {
            (ParseErrorKind::UnexpectedToken, Some(expected)) => {
                speed_diagnostic::unexpected_token(self.span, expected, &describe(&self.found))
            }
            (ParseErrorKind::ExpectedExpression, _) => {
                speed_diagnostic::expected_expression(self.span, &describe(&self.found))
            }
            _ => Diagnostic::error(self.code())
                .with_message(self.message.clone())
                .with_label(self.span, "cannot assign to this expression"),
        }
    }
}

/// `RBRACE `}``-style description of a token for messages.
pub(crate) fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Eof => "end of file".to_string(),
        other => format!("{} `{other}`", other.tag_name()),
    }
}
