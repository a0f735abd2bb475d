//! Tokens produced by the lexer.

use std::fmt;

use crate::Span;

/// A lexed token: its kind plus the source range it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// The exact source text this token was lexed from.
    ///
    /// Returns an empty string for synthetic tokens (`Eof`) or when `source`
    /// is not the text the token came from.
    pub fn lexeme<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.to_range()).unwrap_or("")
    }
}

/// Token kinds.
///
/// Literal and identifier kinds carry their decoded value; every other kind
/// is fully described by its tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Int(i64),
    /// Float literal stored as raw bits so the kind stays `Eq + Hash`.
    Float(u64),
    /// String literal with escapes already decoded.
    String(String),
    Bool(bool),
    Ident(String),

    // Keywords
    Fn,
    Class,
    Let,
    Const,
    If,
    Else,
    While,
    For,
    Return,
    Import,
    From,
    As,
    Public,
    Private,
    Protected,
    Static,
    Async,
    Await,
    New,

    // Type keywords
    IntType,
    FloatType,
    StringType,
    BoolType,
    VoidType,
    AnyType,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AmpAmp,
    PipePipe,
    Bang,
    PipeArrow,
    FatArrow,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    Dot,

    Eof,
}

impl TokenKind {
    /// Upper-case tag name used in diagnostics and token dumps.
    pub const fn tag_name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "INTEGER",
            TokenKind::Float(_) => "FLOAT",
            TokenKind::String(_) => "STRING",
            TokenKind::Bool(_) => "BOOLEAN",
            TokenKind::Ident(_) => "IDENTIFIER",
            TokenKind::Fn => "FUNCTION",
            TokenKind::Class => "CLASS",
            TokenKind::Let => "LET",
            TokenKind::Const => "CONST",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Return => "RETURN",
            TokenKind::Import => "IMPORT",
            TokenKind::From => "FROM",
            TokenKind::As => "AS",
            TokenKind::Public => "PUBLIC",
            TokenKind::Private => "PRIVATE",
            TokenKind::Protected => "PROTECTED",
            TokenKind::Static => "STATIC",
            TokenKind::Async => "ASYNC",
            TokenKind::Await => "AWAIT",
            TokenKind::New => "NEW",
            TokenKind::IntType => "TYPE_INT",
            TokenKind::FloatType => "TYPE_FLOAT",
            TokenKind::StringType => "TYPE_STRING",
            TokenKind::BoolType => "TYPE_BOOL",
            TokenKind::VoidType => "TYPE_VOID",
            TokenKind::AnyType => "TYPE_ANY",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Percent => "MODULO",
            TokenKind::Eq => "ASSIGN",
            TokenKind::EqEq => "EQUALS",
            TokenKind::NotEq => "NOT_EQUALS",
            TokenKind::Lt => "LESS_THAN",
            TokenKind::Gt => "GREATER_THAN",
            TokenKind::LtEq => "LESS_EQUAL",
            TokenKind::GtEq => "GREATER_EQUAL",
            TokenKind::AmpAmp => "AND",
            TokenKind::PipePipe => "OR",
            TokenKind::Bang => "NOT",
            TokenKind::PipeArrow => "PIPE",
            TokenKind::FatArrow => "ARROW",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Dot => "DOT",
            TokenKind::Eof => "EOF",
        }
    }

    /// Source spelling for fixed tokens, used in "expected `x`" messages.
    ///
    /// Returns `None` for literals and identifiers, whose spelling varies.
    pub const fn symbol(&self) -> Option<&'static str> {
        let s = match self {
            TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::String(_)
            | TokenKind::Bool(_)
            | TokenKind::Ident(_)
            | TokenKind::Eof => return None,
            TokenKind::Fn => "fn",
            TokenKind::Class => "class",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Return => "return",
            TokenKind::Import => "import",
            TokenKind::From => "from",
            TokenKind::As => "as",
            TokenKind::Public => "public",
            TokenKind::Private => "private",
            TokenKind::Protected => "protected",
            TokenKind::Static => "static",
            TokenKind::Async => "async",
            TokenKind::Await => "await",
            TokenKind::New => "new",
            TokenKind::IntType => "int",
            TokenKind::FloatType => "float",
            TokenKind::StringType => "string",
            TokenKind::BoolType => "bool",
            TokenKind::VoidType => "void",
            TokenKind::AnyType => "any",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::Bang => "!",
            TokenKind::PipeArrow => "|>",
            TokenKind::FatArrow => "=>",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
        };
        Some(s)
    }

    /// Whether two kinds have the same tag, ignoring literal payloads.
    pub fn same_tag(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, TokenKind::Eof)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "{n}"),
            TokenKind::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            TokenKind::String(s) => write!(f, "{s:?}"),
            TokenKind::Bool(b) => write!(f, "{b}"),
            TokenKind::Ident(name) => write!(f, "{name}"),
            TokenKind::Eof => write!(f, "end of file"),
            other => write!(f, "{}", other.symbol().unwrap_or("?")),
        }
    }
}
