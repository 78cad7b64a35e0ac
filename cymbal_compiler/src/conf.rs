//! Compiler configuration.

/// Compiler configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConf {
    /// A program declaring more than one `main` block.
    pub duplicate_main: Check,
    /// A device port that does not fit in a single byte,
    /// which is truncated when the value is emitted.
    pub port_range: Check,
}

impl Default for CompilerConf {
    fn default() -> Self {
        Self {
            duplicate_main: Check::Deny,
            port_range: Check::Warn,
        }
    }
}

/// Level of a semantic check.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Accept silently.
    Allow,
    /// Report a warning, compilation still succeeds.
    #[default]
    Warn,
    /// Report an error, compilation fails.
    Deny,
}
