//! Statement parsing.
use super::{block::Block, expr::Expr, Parse, Parser};
use crate::tokens::{Keyword, TokenKind};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Block(Block),
    Deo(DeoStmt),
}

/// Device output, writes a value to a device port.
///
/// # Example
///
/// ```text
/// deo 0x18, 'a'
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeoStmt {
    pub port: Expr,
    pub value: Expr,
}

impl Parse for Stmt {
    fn parse(input: &mut Parser) -> Option<Self> {
        if input.match_token(TokenKind::Keyword(Keyword::Deo)) {
            return DeoStmt::parse(input).map(Stmt::Deo);
        }

        if input.check(TokenKind::LeftBrace) {
            return Block::parse(input).map(Stmt::Block);
        }

        // Always make progress, the block loop relies on it.
        input.error_expected("statement");
        input.advance();
        None
    }
}

impl Parse for DeoStmt {
    /// The `deo` keyword has already been consumed.
    fn parse(input: &mut Parser) -> Option<Self> {
        let port = Expr::parse(input)?;
        input.expect(TokenKind::Comma)?;
        let value = Expr::parse(input)?;

        Some(DeoStmt { port, value })
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stmt::Block(block) => write!(f, "{block}"),
            Stmt::Deo(deo) => write!(f, "deo {}, {}", deo.port, deo.value),
        }
    }
}
