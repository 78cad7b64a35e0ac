//! Semantic analysis.
use super::consteval::ConstEval;
use crate::{
    conf::{Check, CompilerConf},
    diagnostic::{Diagnostic, Diagnostics},
    parsing::{
        walk_decls, walk_stmts, AstVisitor, BinaryExpr, BinaryOp, Block, DeoStmt, Expr, Literal, MainDecl,
        Program,
    },
};

use log::debug;
use std::{convert::Infallible, mem};

/// Validates a parsed program before code generation.
///
/// The analyzer walks the whole tree and records diagnostics instead
/// of stopping, so every problem is reported in one run.
pub struct Analyzer<'a> {
    conf: &'a CompilerConf,
    diagnostics: Diagnostics,
    /// Line of the first main block encountered.
    main_line: Option<u32>,
    /// Line of the innermost block being visited. Nodes below
    /// statement level carry no position, so they report here.
    block_line: u32,
}

impl<'a> Analyzer<'a> {
    pub fn new(conf: &'a CompilerConf) -> Self {
        Self {
            conf,
            diagnostics: Diagnostics::new(),
            main_line: None,
            block_line: 1,
        }
    }

    /// Analyze the program.
    ///
    /// Succeeds with the recorded warnings when no errors were found,
    /// otherwise fails with every recorded diagnostic.
    pub fn analyze(mut self, program: &Program) -> Result<Diagnostics, Diagnostics> {
        debug!("analyzing {} declarations", program.decls.len());

        match walk_decls(&mut self, &program.decls) {
            Ok(()) => {}
            Err(never) => match never {},
        }

        if self.diagnostics.has_errors() {
            Err(self.diagnostics)
        } else {
            Ok(self.diagnostics)
        }
    }

    /// Report a finding at the level configured for its check.
    fn report(&mut self, check: Check, line: u32, message: String) {
        match check {
            Check::Allow => debug!("allowed at line {line}: {message}"),
            Check::Warn => self.diagnostics.push(Diagnostic::warning(line, message)),
            Check::Deny => self.diagnostics.push(Diagnostic::error(line, message)),
        }
    }

    /// A port is addressed with a single byte, the high byte
    /// of the value is dropped when the statement is emitted.
    fn check_port(&mut self, port: &Expr) {
        // Errors in the expression are reported when visiting it.
        if let Ok(value) = ConstEval::new().eval_expr(port) {
            let value = value as u16;
            if value > 0xFF {
                let message = format!(
                    "port 0x{value:04x} does not fit in a byte and will be truncated to 0x{:02x}",
                    value & 0xFF
                );
                self.report(self.conf.port_range, self.block_line, message);
            }
        }
    }
}

impl<'a> AstVisitor for Analyzer<'a> {
    type Error = Infallible;

    fn main_decl(&mut self, decl: &MainDecl) -> Result<(), Infallible> {
        match self.main_line {
            Some(first) => {
                let message = format!("duplicate main block, first defined at line {first}");
                self.report(self.conf.duplicate_main, decl.block.line, message);
            }
            None => self.main_line = Some(decl.block.line),
        }

        self.block(&decl.block)
    }

    fn block(&mut self, block: &Block) -> Result<(), Infallible> {
        let outer = mem::replace(&mut self.block_line, block.line);
        walk_stmts(self, &block.stmts)?;
        self.block_line = outer;
        Ok(())
    }

    fn deo_stmt(&mut self, stmt: &DeoStmt) -> Result<(), Infallible> {
        self.expr(&stmt.port)?;
        self.expr(&stmt.value)?;
        self.check_port(&stmt.port);
        Ok(())
    }

    fn literal(&mut self, _literal: &Literal) -> Result<(), Infallible> {
        Ok(())
    }

    fn binary(&mut self, expr: &BinaryExpr) -> Result<(), Infallible> {
        self.expr(&expr.lhs)?;
        self.expr(&expr.rhs)?;

        if expr.operator == BinaryOp::Div {
            let eval = ConstEval::new();
            // Only the divisor is checked here, the operands
            // report their own failures.
            if eval.eval_expr(&expr.rhs) == Ok(0) {
                let message = "division by zero in constant expression";
                self.diagnostics.push(Diagnostic::error(self.block_line, message));
            }
        }

        Ok(())
    }
}
