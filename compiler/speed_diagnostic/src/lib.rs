//! Diagnostic system for error reporting.
//!
//! Every phase error converts into a [`Diagnostic`]:
//! - an [`ErrorCode`] for searchability
//! - a message saying what went wrong
//! - labelled spans saying where
//! - notes and suggestions saying why and how to fix

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{expected_expression, unexpected_token, Diagnostic, Label};
pub use error_code::ErrorCode;
