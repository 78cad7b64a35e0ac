//! Two token window over the lexer.
use crate::{
    lex::{LexError, Lexer},
    tokens::{Token, TokenKind},
};

use log::trace;
use std::mem;

/// Window of the current token and one token of look ahead.
///
/// Tokens are lazily lexed. Lexical errors are not part of the
/// stream, the offending input is skipped and the errors are handed
/// to the caller when the token following them becomes current.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    current: Token,
    next: Token,
    /// Lexical errors found in front of the look ahead token.
    pending: Vec<LexError>,
}

impl<'a> TokenStream<'a> {
    /// Create an unprimed stream.
    ///
    /// Both slots start out as end-of-file, so the stream must be
    /// advanced twice before the current token is meaningful.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            current: Token::new(TokenKind::EOF, "<eof>", 1),
            next: Token::new(TokenKind::EOF, "<eof>", 1),
            pending: vec![],
        }
    }

    /// Token under the cursor.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.current
    }

    #[inline]
    pub fn check(&self, token_kind: TokenKind) -> bool {
        self.current.kind == token_kind
    }

    /// Slide the window forward by one token, returning the
    /// token that was current.
    ///
    /// Lexical errors in front of the token that becomes current
    /// are passed to `on_error`. Errors found while refilling the
    /// look ahead slot are held back until the next slide.
    pub fn advance(&mut self, mut on_error: impl FnMut(LexError)) -> Token {
        for err in self.pending.drain(..) {
            on_error(err);
        }

        let token = loop {
            match self.lexer.next_token() {
                Ok(token) => break token,
                Err(err) => self.pending.push(err),
            }
        };
        trace!("line {}: {} {:?}", token.line, token.kind, token.lexeme.as_str());

        let next = mem::replace(&mut self.next, token);
        mem::replace(&mut self.current, next)
    }
}
