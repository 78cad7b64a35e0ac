//! Compiler for the cymbal language, targeting the Uxn virtual machine.
pub mod compile;
pub mod conf;
pub mod diagnostic;
pub mod error;
pub mod lex;
pub mod parsing;
pub mod token_stream;
pub mod tokens;

pub use self::{
    conf::{Check, CompilerConf},
    diagnostic::{Diagnostic, Diagnostics, Severity},
    error::{CompileError, CompileResult},
};

use compile::{Analyzer, CodeGen};
use log::{debug, trace, warn};

/// Output of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    /// Memory image, to be loaded at the reset vector.
    pub image: Vec<u8>,
    /// Warnings reported along the way.
    pub warnings: Diagnostics,
}

/// Full pipeline from source text to memory image.
#[derive(Debug, Default)]
pub struct Compiler {
    conf: CompilerConf,
}

impl Compiler {
    pub fn new(conf: CompilerConf) -> Self {
        Self { conf }
    }

    pub fn compile(&self, source: &str) -> CompileResult<Compiled> {
        // Lexical and syntactic analysis
        let lexer = lex::Lexer::new(source);
        let program = parsing::Parser::new(lexer)
            .parse()
            .map_err(CompileError::Parse)?;
        trace!("program: {program}");

        // Semantic analysis
        let warnings = Analyzer::new(&self.conf)
            .analyze(&program)
            .map_err(CompileError::Semantic)?;

        // Code generation
        let image = CodeGen::new().compile(&program);
        if !cymbal_core::check_image_size(&image) {
            return Err(CompileError::LargeImage(image.len()));
        }

        debug!("compiled {} bytes with {} warnings", image.len(), warnings.len());
        Ok(Compiled { image, warnings })
    }
}

/// Compile with the default configuration.
///
/// Warnings are sent to the log.
pub fn compile_str(source: &str) -> CompileResult<Vec<u8>> {
    let Compiled { image, warnings } = Compiler::default().compile(source)?;

    for warning in &warnings {
        warn!("{warning}");
    }

    Ok(image)
}
