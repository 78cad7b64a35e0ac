// Constant expression evaluator.
use crate::parsing::{BinaryOp, Expr};

use std::fmt;

/// Constant expression evaluator.
///
/// Expressions made only of literals have a value fixed at compile
/// time, which lets the analyzer check them before any code is
/// generated.
///
/// Arithmetic mirrors the target machine: 16-bit, wrapping, and
/// division is unsigned.
#[derive(Debug, Default)]
pub struct ConstEval;

impl ConstEval {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Entry point for the evaluator.
    pub fn eval_expr(&self, expr: &Expr) -> Result<i16, ConstError> {
        match expr {
            Expr::Literal(lit) => Ok(lit.value),
            Expr::Binary(bin) => {
                let lhs = self.eval_expr(&bin.lhs)? as u16;
                let rhs = self.eval_expr(&bin.rhs)? as u16;

                let value = match bin.operator {
                    BinaryOp::Add => lhs.wrapping_add(rhs),
                    BinaryOp::Sub => lhs.wrapping_sub(rhs),
                    BinaryOp::Mul => lhs.wrapping_mul(rhs),
                    BinaryOp::Div => lhs.checked_div(rhs).ok_or(ConstError::DivisionByZero)?,
                };

                Ok(value as i16)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstError {
    DivisionByZero,
}

impl std::error::Error for ConstError {}

impl fmt::Display for ConstError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero in constant expression"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_eval_arithmetic() {
        let eval = ConstEval::new();
        let expr = Expr::binary(
            BinaryOp::Mul,
            Expr::binary(BinaryOp::Add, Expr::literal(2), Expr::literal(3)),
            Expr::literal(4),
        );
        assert_eq!(eval.eval_expr(&expr), Ok(20));

        let expr = Expr::binary(BinaryOp::Sub, Expr::literal(1), Expr::literal(2));
        assert_eq!(eval.eval_expr(&expr), Ok(-1));
    }

    #[test]
    fn test_eval_wrapping() {
        let eval = ConstEval::new();
        let expr = Expr::binary(BinaryOp::Add, Expr::literal(i16::MAX), Expr::literal(1));
        assert_eq!(eval.eval_expr(&expr), Ok(i16::MIN));
    }

    #[test]
    fn test_eval_unsigned_division() {
        let eval = ConstEval::new();
        // 0xfffe / 2
        let expr = Expr::binary(BinaryOp::Div, Expr::literal(-2), Expr::literal(2));
        assert_eq!(eval.eval_expr(&expr), Ok(0x7fff));
    }

    #[test]
    fn test_eval_division_by_zero() {
        let eval = ConstEval::new();
        let expr = Expr::binary(BinaryOp::Div, Expr::literal(1), Expr::literal(0));
        assert_eq!(eval.eval_expr(&expr), Err(ConstError::DivisionByZero));
    }
}
