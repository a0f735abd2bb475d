//! Error codes for all compiler diagnostics.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit is the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Name resolution and type errors
/// - E5xxx: Code generation errors
/// - E9xxx: Driver / internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// No token rule matches the input
    E0001,
    /// Integer literal does not fit in 64 bits
    E0002,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Invalid assignment target
    E1003,

    // Type Errors (E2xxx)
    /// Type mismatch
    E2001,
    /// Unknown type name
    E2002,
    /// Undefined variable
    E2003,
    /// Undefined function
    E2004,
    /// Undefined member
    E2005,
    /// Wrong number of arguments
    E2006,
    /// Duplicate definition
    E2007,
    /// Operator not supported for operand type
    E2008,
    /// Assignment to a constant
    E2009,
    /// Value is not an object or not callable
    E2010,

    // Codegen Errors (E5xxx)
    /// Literal cannot be represented in the target type
    E5001,
    /// Statement not allowed in this position
    E5002,
    /// Unsupported operation
    E5003,

    // Internal Errors (E9xxx)
    /// Failed to write compiler output
    E9001,
}

impl ErrorCode {
    /// All error codes, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E5001,
        ErrorCode::E5002,
        ErrorCode::E5003,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E5003 => "E5003",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line summary of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unrecognized input",
            ErrorCode::E0002 => "integer literal too large",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "invalid assignment target",
            ErrorCode::E2001 => "type mismatch",
            ErrorCode::E2002 => "unknown type",
            ErrorCode::E2003 => "undefined variable",
            ErrorCode::E2004 => "undefined function",
            ErrorCode::E2005 => "undefined member",
            ErrorCode::E2006 => "wrong number of arguments",
            ErrorCode::E2007 => "duplicate definition",
            ErrorCode::E2008 => "invalid operand",
            ErrorCode::E2009 => "assignment to constant",
            ErrorCode::E2010 => "not an object or callable",
            ErrorCode::E5001 => "unsupported literal",
            ErrorCode::E5002 => "misplaced statement",
            ErrorCode::E5003 => "unsupported operation",
            ErrorCode::E9001 => "output error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
