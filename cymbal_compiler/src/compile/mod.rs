//! Semantic analysis and code generation.
mod analyzer;
pub mod codegen;
mod consteval;

pub use analyzer::Analyzer;
pub use codegen::CodeGen;
pub use consteval::{ConstError, ConstEval};
