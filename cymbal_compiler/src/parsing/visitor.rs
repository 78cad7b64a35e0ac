//! Traversal protocol shared by the passes over the tree.
use super::{
    block::Block,
    expr::{BinaryExpr, Expr},
    literal::Literal,
    prog::{Decl, MainDecl},
    stmts::{DeoStmt, Stmt},
};

/// Tree visitor.
///
/// Each pass implements one method per node variant. Dispatch over the
/// node families is provided, and matches exhaustively, so adding a
/// variant forces every pass to handle it.
///
/// Returning an error stops the traversal.
pub trait AstVisitor {
    type Error;

    fn main_decl(&mut self, decl: &MainDecl) -> Result<(), Self::Error>;
    fn block(&mut self, block: &Block) -> Result<(), Self::Error>;
    fn deo_stmt(&mut self, stmt: &DeoStmt) -> Result<(), Self::Error>;
    fn literal(&mut self, literal: &Literal) -> Result<(), Self::Error>;
    fn binary(&mut self, expr: &BinaryExpr) -> Result<(), Self::Error>;

    #[inline]
    fn decl(&mut self, decl: &Decl) -> Result<(), Self::Error> {
        match decl {
            Decl::Main(main) => self.main_decl(main),
        }
    }

    #[inline]
    fn stmt(&mut self, stmt: &Stmt) -> Result<(), Self::Error> {
        match stmt {
            Stmt::Block(block) => self.block(block),
            Stmt::Deo(deo) => self.deo_stmt(deo),
        }
    }

    #[inline]
    fn expr(&mut self, expr: &Expr) -> Result<(), Self::Error> {
        match expr {
            Expr::Literal(literal) => self.literal(literal),
            Expr::Binary(binary) => self.binary(binary),
        }
    }
}

/// Visit the declarations in order, stopping at the first error.
pub fn walk_decls<V>(visitor: &mut V, decls: &[Decl]) -> Result<(), V::Error>
where
    V: AstVisitor + ?Sized,
{
    for decl in decls {
        visitor.decl(decl)?;
    }
    Ok(())
}

/// Visit the statements in order, stopping at the first error.
pub fn walk_stmts<V>(visitor: &mut V, stmts: &[Stmt]) -> Result<(), V::Error>
where
    V: AstVisitor + ?Sized,
{
    for stmt in stmts {
        visitor.stmt(stmt)?;
    }
    Ok(())
}
