//! Shared data types for the Speed compiler.
//!
//! Every later phase depends on this crate:
//! - [`Span`]: byte range into the source text
//! - [`Token`] / [`TokenKind`]: lexer output
//! - [`ast`]: the closed node taxonomy produced by the parser

/// Compile-time size assertion for hot data types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod span;
mod token;

pub use ast::{BinaryOp, UnaryOp};
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind};
