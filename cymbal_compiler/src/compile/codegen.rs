//! Lowering of the tree to machine code.
use crate::parsing::{
    walk_decls, walk_stmts, AstVisitor, BinaryExpr, BinaryOp, Block, DeoStmt, Literal, MainDecl, Program,
};
use cymbal_core::{Disassembler, OpCode};

use log::{debug, log_enabled, trace, Level};
use std::convert::Infallible;

/// Buffer that instructions are currently written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Code,
    Main,
}

/// Code generator.
pub struct CodeGen {
    /// Code of the main block, placed at the reset vector.
    main: Vec<u8>,
    /// Everything else, placed after the main block.
    code: Vec<u8>,
    target: Target,
}

impl CodeGen {
    #[inline]
    pub fn new() -> Self {
        Self {
            main: vec![],
            code: vec![],
            target: Target::Code,
        }
    }

    /// Lower the program into a memory image, to be loaded at the reset vector.
    ///
    /// The program must have passed semantic analysis.
    pub fn compile(mut self, program: &Program) -> Vec<u8> {
        match walk_decls(&mut self, &program.decls) {
            Ok(()) => {}
            Err(never) => match never {},
        }

        let Self { mut main, code, .. } = self;
        let image = if main.is_empty() {
            code
        } else {
            main.extend(code);
            main
        };
        debug!("generated image of {} bytes", image.len());

        if log_enabled!(Level::Trace) {
            if let Ok(listing) = Disassembler::new(&image).listing() {
                trace!("image listing:\n{listing}");
            }
        }

        image
    }

    #[inline]
    fn buffer(&mut self) -> &mut Vec<u8> {
        match self.target {
            Target::Code => &mut self.code,
            Target::Main => &mut self.main,
        }
    }

    #[inline]
    fn emit_op(&mut self, op: OpCode) {
        self.buffer().push(op.byte());
    }

    /// Push a 16-bit value onto the working stack.
    #[inline]
    fn emit_lit2(&mut self, value: i16) {
        let [hi, lo] = value.to_be_bytes();
        self.buffer().extend([OpCode::LIT2.byte(), hi, lo]);
    }
}

impl Default for CodeGen {
    fn default() -> Self {
        Self::new()
    }
}

impl AstVisitor for CodeGen {
    type Error = Infallible;

    fn main_decl(&mut self, decl: &MainDecl) -> Result<(), Infallible> {
        assert_eq!(self.target, Target::Code, "main block nested in main block");

        self.target = Target::Main;
        walk_stmts(self, &decl.block.stmts)?;
        self.emit_op(OpCode::BRK);
        self.target = Target::Code;

        Ok(())
    }

    fn block(&mut self, block: &Block) -> Result<(), Infallible> {
        walk_stmts(self, &block.stmts)
    }

    /// Value goes first so the port ends up on top of the stack.
    fn deo_stmt(&mut self, stmt: &DeoStmt) -> Result<(), Infallible> {
        self.expr(&stmt.value)?;
        self.expr(&stmt.port)?;
        // Ports are a single byte.
        self.emit_op(OpCode::NIP);
        self.emit_op(OpCode::DEO2);
        Ok(())
    }

    fn literal(&mut self, literal: &Literal) -> Result<(), Infallible> {
        self.emit_lit2(literal.value);
        Ok(())
    }

    fn binary(&mut self, expr: &BinaryExpr) -> Result<(), Infallible> {
        self.expr(&expr.lhs)?;
        self.expr(&expr.rhs)?;

        #[rustfmt::skip]
        let op = match expr.operator {
            BinaryOp::Add => OpCode::ADD2,
            BinaryOp::Sub => OpCode::SUB2,
            BinaryOp::Mul => OpCode::MUL2,
            BinaryOp::Div => OpCode::DIV2,
        };
        self.emit_op(op);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parsing::{Decl, Expr, Stmt};

    fn main(stmts: Vec<Stmt>) -> Decl {
        Decl::Main(MainDecl {
            block: Block { line: 1, stmts },
        })
    }

    fn deo(port: Expr, value: Expr) -> Stmt {
        Stmt::Deo(DeoStmt { port, value })
    }

    #[test]
    fn test_deo() {
        let program = Program {
            decls: vec![main(vec![deo(Expr::literal(0x18), Expr::literal(0x61))])],
        };
        let image = CodeGen::new().compile(&program);

        #[rustfmt::skip]
        assert_eq!(image, [
            0xA0, 0x00, 0x61, // LIT2 0061
            0xA0, 0x00, 0x18, // LIT2 0018
            0x03,             // NIP
            0x37,             // DEO2
            0x00,             // BRK
        ]);
    }

    #[test]
    fn test_empty_program() {
        assert!(CodeGen::new().compile(&Program::default()).is_empty());
    }

    #[test]
    fn test_empty_main() {
        let program = Program {
            decls: vec![main(vec![])],
        };
        assert_eq!(CodeGen::new().compile(&program), [0x00]);
    }

    #[test]
    fn test_negative_literal() {
        let program = Program {
            decls: vec![main(vec![deo(Expr::literal(0x18), Expr::literal(-1))])],
        };
        let image = CodeGen::new().compile(&program);
        assert_eq!(&image[..3], &[0xA0, 0xFF, 0xFF]);
    }

    #[test]
    fn test_nested_block() {
        let program = Program {
            decls: vec![main(vec![Stmt::Block(Block {
                line: 2,
                stmts: vec![deo(Expr::literal(1), Expr::literal(2))],
            })])],
        };
        let image = CodeGen::new().compile(&program);
        assert_eq!(image, [0xA0, 0x00, 0x02, 0xA0, 0x00, 0x01, 0x03, 0x37, 0x00]);
    }

    #[test]
    fn test_binary() {
        let value = Expr::binary(BinaryOp::Sub, Expr::literal(5), Expr::literal(3));
        let program = Program {
            decls: vec![main(vec![deo(Expr::literal(0x18), value)])],
        };
        let image = CodeGen::new().compile(&program);

        #[rustfmt::skip]
        assert_eq!(image, [
            0xA0, 0x00, 0x05,
            0xA0, 0x00, 0x03,
            0x39,             // SUB2
            0xA0, 0x00, 0x18,
            0x03, 0x37, 0x00,
        ]);
    }

    #[test]
    fn test_main_first() {
        let program = Program {
            decls: vec![
                main(vec![deo(Expr::literal(1), Expr::literal(2))]),
                main(vec![deo(Expr::literal(3), Expr::literal(4))]),
            ],
        };
        let image = CodeGen::new().compile(&program);

        assert_eq!(image.len(), 18);
        assert_eq!(image[8], 0x00);
        assert_eq!(image[17], 0x00);
        assert_eq!(&image[9..12], &[0xA0, 0x00, 0x04]);
    }
}
