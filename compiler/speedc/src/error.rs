//! Errors from any compilation phase.

use std::path::PathBuf;

use speed_codegen::CodegenError;
use speed_diagnostic::{Diagnostic, ErrorCode};
use speed_lexer::LexError;
use speed_parse::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("{operation} is not supported")]
    UnsupportedOperation { operation: &'static str },

    #[error("could not write `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CompileError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CompileError::Lex(err) => err.code(),
            CompileError::Parse(err) => err.code(),
            CompileError::Codegen(err) => err.code(),
            CompileError::UnsupportedOperation { .. } => ErrorCode::E5003,
            CompileError::Io { .. } => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Lex(err) => err.to_diagnostic(),
            CompileError::Parse(err) => err.to_diagnostic(),
            CompileError::Codegen(err) => err.to_diagnostic(),
            CompileError::UnsupportedOperation { .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_note("only LLVM textual IR (`.ll`) output is available"),
            CompileError::Io { .. } => Diagnostic::error(self.code()).with_message(self.to_string()),
        }
    }
}
