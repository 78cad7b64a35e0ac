//! Result and errors.
use crate::diagnostic::Diagnostics;
use std::fmt::{self, Display, Formatter};

pub type CompileResult<T> = std::result::Result<T, CompileError>;

#[derive(Debug)]
pub enum CompileError {
    /// Lexical or syntax errors, no program was built.
    Parse(Diagnostics),
    /// The program is well formed but was rejected by semantic analysis.
    Semantic(Diagnostics),
    /// Attempt to produce an image that can't fit in memory.
    LargeImage(usize),
}

impl CompileError {
    /// Diagnostics explaining the failure, if it came from the source.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Parse(diagnostics) | Self::Semantic(diagnostics) => Some(diagnostics),
            Self::LargeImage(_) => None,
        }
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(diagnostics) => write!(f, "parsing failed:\n{diagnostics}"),
            Self::Semantic(diagnostics) => write!(f, "semantic analysis failed:\n{diagnostics}"),
            Self::LargeImage(size) => write!(f, "program image of {size} bytes too large for memory"),
        }
    }
}

impl std::error::Error for CompileError {}
