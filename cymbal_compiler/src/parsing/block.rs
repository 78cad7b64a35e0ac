use super::{stmts::Stmt, Parse, Parser};
use crate::tokens::TokenKind;

use itertools::Itertools;
use std::fmt;

/// Delimited block of statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Line of the opening brace.
    pub line: u32,
    pub stmts: Vec<Stmt>,
}

impl Parse for Block {
    fn parse(input: &mut Parser) -> Option<Self> {
        let left_brace = input.expect(TokenKind::LeftBrace)?;
        let mut stmts = vec![];

        while !(input.at_end() || input.check(TokenKind::RightBrace)) {
            if let Some(stmt) = Stmt::parse(input) {
                stmts.push(stmt);
            }
        }

        input.expect(TokenKind::RightBrace)?;

        Some(Block {
            line: left_brace.line,
            stmts,
        })
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.stmts.is_empty() {
            write!(f, "{{ }}")
        } else {
            write!(f, "{{ {} }}", self.stmts.iter().join("; "))
        }
    }
}
