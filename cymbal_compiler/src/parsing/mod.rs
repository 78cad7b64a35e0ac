//! Syntactic analysis.
//!
//! Recursive descent over a two token window. Each node of the
//! tree knows how to parse itself via [`Parse`].
mod block;
mod expr;
mod literal;
mod prog;
mod stmts;
mod visitor;

pub use block::*;
pub use expr::*;
pub use literal::*;
pub use prog::*;
pub use stmts::*;
pub use visitor::*;

use crate::{
    diagnostic::{Diagnostic, Diagnostics},
    lex::Lexer,
    token_stream::TokenStream,
    tokens::{Keyword, Token, TokenKind},
};
use log::debug;

pub trait Parse: Sized {
    /// Parse the node at the current token.
    ///
    /// Returns `None` when the node could not be built, in which
    /// case an error was recorded in the parser (or suppressed
    /// because the parser is in panic mode).
    fn parse(input: &mut Parser) -> Option<Self>;
}

/// Parser state for one compilation unit.
pub struct Parser<'a> {
    input: TokenStream<'a>,
    diagnostics: Diagnostics,
    /// Set by the first error, suppresses every following error
    /// until the parser synchronizes on a declaration boundary.
    panic_mode: bool,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            input: TokenStream::new(lexer),
            diagnostics: Diagnostics::new(),
            panic_mode: false,
        }
    }

    /// Parses the whole source into a program.
    ///
    /// No partial tree is returned. When any error was recorded,
    /// the diagnostics are returned instead.
    pub fn parse(mut self) -> Result<Program, Diagnostics> {
        // Fill both slots of the window.
        self.advance();
        self.advance();

        let program = Program::parse(&mut self);

        match program {
            Some(program) if !self.diagnostics.has_errors() => {
                debug!("parsed {} declarations", program.decls.len());
                Ok(program)
            }
            _ => {
                debug!("parsing failed with {} errors", self.diagnostics.len());
                Err(self.diagnostics)
            }
        }
    }

    /// Diagnostics recorded so far.
    #[inline]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.input.current()
    }

    #[inline]
    pub fn check(&self, token_kind: TokenKind) -> bool {
        self.input.check(token_kind)
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.check(TokenKind::EOF)
    }

    #[inline]
    pub fn in_panic(&self) -> bool {
        self.panic_mode
    }

    /// Consumes the current token regardless of type.
    pub fn advance(&mut self) -> Token {
        let Self {
            input,
            diagnostics,
            panic_mode,
        } = self;

        input.advance(|err| report(diagnostics, panic_mode, Diagnostic::error(err.line, err)))
    }

    /// Consumes the current token if it matches the given token type.
    pub fn match_token(&mut self, token_kind: TokenKind) -> bool {
        if self.check(token_kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token, which must match the given type.
    ///
    /// Records an error and leaves the token in place otherwise.
    pub fn expect(&mut self, token_kind: TokenKind) -> Option<Token> {
        if self.check(token_kind) {
            Some(self.advance())
        } else {
            self.error_expected(token_kind.to_string());
            None
        }
    }

    /// Records an "expected X, but got Y" error at the current token.
    pub fn error_expected(&mut self, expected: impl AsRef<str>) {
        let message = format!("expected {}, but got {}", expected.as_ref(), self.current().kind);
        self.error_at_current(message);
    }

    pub fn error_at_current(&mut self, message: impl ToString) {
        let line = self.current().line;
        self.error(line, message);
    }

    #[cold]
    pub fn error(&mut self, line: u32, message: impl ToString) {
        report(
            &mut self.diagnostics,
            &mut self.panic_mode,
            Diagnostic::error(line, message),
        );
    }

    /// Skip tokens until the start of the next declaration and
    /// leave panic mode.
    pub fn synchronize(&mut self) {
        while !(self.at_end() || self.check(TokenKind::Keyword(Keyword::Main))) {
            self.advance();
        }
        self.panic_mode = false;
    }
}

fn report(diagnostics: &mut Diagnostics, panic_mode: &mut bool, diagnostic: Diagnostic) {
    if *panic_mode {
        debug!("suppressed: {diagnostic}");
        return;
    }
    *panic_mode = true;
    diagnostics.push(diagnostic);
}
