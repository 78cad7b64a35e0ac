//! Compilation unit and top level declarations.
use super::{block::Block, Parse, Parser};
use crate::tokens::{Keyword, TokenKind};

use itertools::Itertools;
use std::fmt;

/// Root of a compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Main(MainDecl),
}

/// Code in the reset vector, the code starting directly
/// at 0x100 in memory.
///
/// # Example
///
/// ```text
/// main {
///     deo 0x18, 'a'
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainDecl {
    pub block: Block,
}

impl Parse for Program {
    fn parse(input: &mut Parser) -> Option<Self> {
        let mut decls = vec![];

        while !input.at_end() {
            if let Some(decl) = Decl::parse(input) {
                decls.push(decl);
            }

            // Declarations are the recovery point after an error.
            if input.in_panic() {
                input.synchronize();
            }
        }

        input.expect(TokenKind::EOF)?;

        Some(Program { decls })
    }
}

impl Parse for Decl {
    fn parse(input: &mut Parser) -> Option<Self> {
        if input.match_token(TokenKind::Keyword(Keyword::Main)) {
            return MainDecl::parse(input).map(Decl::Main);
        }

        input.error_expected("declaration");
        input.advance();
        None
    }
}

impl Parse for MainDecl {
    /// The `main` keyword has already been consumed.
    fn parse(input: &mut Parser) -> Option<Self> {
        Block::parse(input).map(|block| MainDecl { block })
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.decls.iter().join("\n"))
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Decl::Main(main) => write!(f, "main {}", main.block),
        }
    }
}
