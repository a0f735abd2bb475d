//! Token cursor for navigating the token stream.
//!
//! The cursor never moves past the final `Eof` token, so `current()` is
//! always valid.

use speed_ir::{Span, Token, TokenKind};
use tracing::trace;

use crate::ParseError;

/// Stand-in for streams that were not terminated by the lexer.
static EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
};

pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind().is_eof()
    }

    /// Whether the current token has the same tag as `kind`.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_tag(kind)
    }

    /// Consume the current token and return it; stays put on `Eof`.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        trace!(
            pos = self.pos,
            kind = token.kind.tag_name(),
            span_start = token.span.start,
            span_end = token.span.end,
            "advance"
        );
        if !token.kind.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the same tag as `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail naming what was found.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: &TokenKind) -> ParseError {
        let expected = kind
            .symbol()
            .map_or_else(|| kind.tag_name().to_lowercase(), |s| format!("`{s}`"));
        ParseError::unexpected(expected, self.current())
    }

    /// Consume an identifier, returning its name and span.
    pub fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let span = self.advance().span;
            Ok((name.clone(), span))
        } else {
            Err(ParseError::unexpected("identifier", self.current()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, start: u32) -> Token {
        Token::new(kind, Span::new(start, start + 1))
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let tokens = vec![tok(TokenKind::Semicolon, 0), tok(TokenKind::Eof, 1)];
        let mut cursor = Cursor::new(&tokens);

        assert_eq!(cursor.advance().kind, TokenKind::Semicolon);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.advance().kind, TokenKind::Eof);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.previous_span(), Span::new(0, 1));
    }

    #[test]
    fn test_empty_stream_reads_as_eof() {
        let cursor = Cursor::new(&[]);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.previous_span(), Span::DUMMY);
    }

    #[test]
    fn test_check_ignores_payload() {
        let tokens = vec![tok(TokenKind::Ident("a".into()), 0), tok(TokenKind::Eof, 1)];
        let cursor = Cursor::new(&tokens);
        assert!(cursor.check(&TokenKind::Ident(String::new())));
        assert!(!cursor.check(&TokenKind::Int(0)));
    }

    #[test]
    fn test_expect_error_names_token() {
        let tokens = vec![tok(TokenKind::RBrace, 4), tok(TokenKind::Eof, 5)];
        let mut cursor = Cursor::new(&tokens);
        let err = cursor.expect(&TokenKind::Semicolon).unwrap_err();
        assert_eq!(err.message, "expected `;`, found RBRACE `}`");
        assert_eq!(err.span, Span::new(4, 5));
    }

    #[test]
    fn test_expect_ident() {
        let tokens = vec![tok(TokenKind::Ident("x".into()), 0), tok(TokenKind::Eof, 1)];
        let mut cursor = Cursor::new(&tokens);
        assert_eq!(cursor.expect_ident().ok(), Some(("x".to_string(), Span::new(0, 1))));
        let err = cursor.expect_ident().unwrap_err();
        assert_eq!(err.message, "expected identifier, found end of file");
    }
}
