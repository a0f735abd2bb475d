//! Lexer for Speed using logos.
//!
//! [`tokenize`] turns source text into a `Vec<Token>` terminated by `Eof`,
//! or fails on the first input no rule matches.

mod error;

use logos::Logos;
use speed_ir::{Span, Token, TokenKind};

pub use error::{LexError, LexErrorKind};

/// Raw token from logos, before payload decoding.
///
/// Keywords are `#[token]` rules and therefore beat the identifier regex on
/// equal-length matches; longer matches always win (`fnord` is an
/// identifier, `1.5` is one float).
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // Keywords
    #[token("fn")]
    Fn,
    #[token("class")]
    Class,
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("return")]
    Return,
    #[token("import")]
    Import,
    #[token("from")]
    From,
    #[token("as")]
    As,
    #[token("public")]
    Public,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("static")]
    Static,
    #[token("async")]
    Async,
    #[token("await")]
    Await,
    #[token("new")]
    New,

    // Type keywords
    #[token("int")]
    IntType,
    #[token("float")]
    FloatType,
    #[token("string")]
    StringType,
    #[token("bool")]
    BoolType,
    #[token("void")]
    VoidType,
    #[token("any")]
    AnyType,

    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,
    #[token("|>")]
    PipeArrow,
    #[token("=>")]
    FatArrow,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,

    // Float
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    // Integer; overflow makes the callback fail and surfaces as E0002
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    // String literal with backslash escapes
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lex source code into tokens, ending with `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::try_from_range(lexer.span())
            .map_err(|_| LexError::source_too_large(source.len()))?;

        match result {
            Ok(raw) => {
                if let Some(kind) = convert_token(raw, lexer.slice()) {
                    tokens.push(Token::new(kind, span));
                }
            }
            Err(()) => {
                let error = LexError::at(source, span, lexer.slice());
                tracing::debug!(%error, "lexing failed");
                return Err(error);
            }
        }
    }

    let eof = u32::try_from(source.len()).map_err(|_| LexError::source_too_large(source.len()))?;
    tokens.push(Token::new(TokenKind::Eof, Span::point(eof)));

    tracing::trace!(count = tokens.len(), "lexed tokens");
    Ok(tokens)
}

/// Decode a raw token; comments yield `None`.
fn convert_token(raw: RawToken, slice: &str) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::LineComment | RawToken::BlockComment => return None,

        // Literals
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::Float(f) => TokenKind::Float(f.to_bits()),
        RawToken::Bool(b) => TokenKind::Bool(b),
        RawToken::String => {
            let content = slice
                .get(1..slice.len().saturating_sub(1))
                .unwrap_or_default();
            TokenKind::String(unescape_string(content))
        }
        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        // Keywords
        RawToken::Fn => TokenKind::Fn,
        RawToken::Class => TokenKind::Class,
        RawToken::Let => TokenKind::Let,
        RawToken::Const => TokenKind::Const,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::Return => TokenKind::Return,
        RawToken::Import => TokenKind::Import,
        RawToken::From => TokenKind::From,
        RawToken::As => TokenKind::As,
        RawToken::Public => TokenKind::Public,
        RawToken::Private => TokenKind::Private,
        RawToken::Protected => TokenKind::Protected,
        RawToken::Static => TokenKind::Static,
        RawToken::Async => TokenKind::Async,
        RawToken::Await => TokenKind::Await,
        RawToken::New => TokenKind::New,

        // Type keywords
        RawToken::IntType => TokenKind::IntType,
        RawToken::FloatType => TokenKind::FloatType,
        RawToken::StringType => TokenKind::StringType,
        RawToken::BoolType => TokenKind::BoolType,
        RawToken::VoidType => TokenKind::VoidType,
        RawToken::AnyType => TokenKind::AnyType,

        // Operators
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Bang => TokenKind::Bang,
        RawToken::PipeArrow => TokenKind::PipeArrow,
        RawToken::FatArrow => TokenKind::FatArrow,

        // Delimiters
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Dot => TokenKind::Dot,
    };
    Some(kind)
}

/// Process string escape sequences.
///
/// Unknown escapes are kept verbatim.
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') | None => result.push('\\'),
            Some('"') => result.push('"'),
            Some('0') => result.push('\0'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}
