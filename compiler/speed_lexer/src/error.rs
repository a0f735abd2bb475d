//! Lexer errors.

use speed_diagnostic::{Diagnostic, ErrorCode};
use speed_ir::Span;

/// Characters of context kept on each side of the offending input.
const CONTEXT_CHARS: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    /// No token rule matches at this position.
    UnrecognizedInput,
    /// All-digit literal that does not fit in 64 bits.
    IntegerTooLarge,
    /// Source longer than the 32-bit span encoding allows.
    SourceTooLarge,
}

/// Lexing failure: where it happened and the text around it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{} at position {}: `{lexeme}` (near `{context}`)", describe(.kind), .span.start)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    /// The input that failed to lex.
    pub lexeme: String,
    /// Source text surrounding the failure.
    pub context: String,
}

impl LexError {
    pub(crate) fn at(source: &str, span: Span, lexeme: &str) -> Self {
        let kind = if !lexeme.is_empty() && lexeme.bytes().all(|b| b.is_ascii_digit()) {
            LexErrorKind::IntegerTooLarge
        } else {
            LexErrorKind::UnrecognizedInput
        };
        LexError {
            kind,
            span,
            lexeme: lexeme.to_string(),
            context: surrounding_text(source, span),
        }
    }

    pub(crate) fn source_too_large(len: usize) -> Self {
        LexError {
            kind: LexErrorKind::SourceTooLarge,
            span: Span::point(u32::MAX),
            lexeme: String::new(),
            context: format!("{len} bytes"),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnrecognizedInput | LexErrorKind::SourceTooLarge => ErrorCode::E0001,
            LexErrorKind::IntegerTooLarge => ErrorCode::E0002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(format!("{}: `{}`", describe(&self.kind), self.lexeme));
        match self.kind {
            LexErrorKind::UnrecognizedInput => diag
                .with_label(self.span, "no token starts here")
                .with_note(format!("near `{}`", self.context)),
            LexErrorKind::IntegerTooLarge => diag
                .with_label(self.span, "does not fit in a 64-bit integer"),
            LexErrorKind::SourceTooLarge => diag.with_note(format!(
                "the source is {}; at most {} bytes are supported",
                self.context,
                u32::MAX
            )),
        }
    }
}

fn describe(kind: &LexErrorKind) -> &'static str {
    match kind {
        LexErrorKind::UnrecognizedInput => "unexpected character",
        LexErrorKind::IntegerTooLarge => "integer literal too large",
        LexErrorKind::SourceTooLarge => "source file too large",
    }
}

/// Up to `CONTEXT_CHARS` characters either side of `span.start`.
fn surrounding_text(source: &str, span: Span) -> String {
    let start = (span.start as usize).min(source.len());
    let before = source.get(..start).unwrap_or_default();
    let after = source.get(start..).unwrap_or_default();

    let skip = before.chars().count().saturating_sub(CONTEXT_CHARS);
    let mut text: String = before.chars().skip(skip).collect();
    text.extend(after.chars().take(CONTEXT_CHARS));
    text
}
