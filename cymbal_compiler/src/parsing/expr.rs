use super::{literal::Literal, Parse, Parser};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Literal),
    /// Not produced by the parser yet.
    Binary(BinaryExpr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpr {
    pub operator: BinaryOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Expr {
    #[inline]
    pub fn literal(value: i16) -> Self {
        Expr::Literal(Literal { value })
    }

    #[inline]
    pub fn binary(operator: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }
}

impl Parse for Expr {
    // TODO: Binary expressions, operator tokens are already lexed.
    fn parse(input: &mut Parser) -> Option<Self> {
        Literal::parse(input).map(Expr::Literal)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{}", lit.value),
            Expr::Binary(bin) => write!(f, "({} {} {})", bin.lhs, bin.operator, bin.rhs),
        }
    }
}

impl fmt::Display for BinaryOp {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
        }
    }
}
