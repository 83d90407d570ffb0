//! Engine tuning knobs.

/// Configuration for incremental updates.
///
/// The defaults reproduce a full parse on every edit while reparsing only the
/// blocks around the change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    /// Non-empty blocks added on each side of the blocks an edit touches.
    /// Empty gap blocks in between are absorbed without counting.
    pub context_blocks: usize,
    /// How often the span may grow before giving up and parsing the whole
    /// document.
    pub max_convergence_passes: usize,
    /// Parse out-of-span blocks holding link or footnote definitions along
    /// with a span so references inside it resolve as in a full parse.
    pub reference_preamble: bool,
    /// When false, every update parses the whole document.
    pub incremental: bool,
}

impl EngineConfig {
    pub const DEFAULT_CONTEXT_BLOCKS: usize = 1;
    pub const DEFAULT_MAX_CONVERGENCE_PASSES: usize = 8;

    #[must_use]
    pub fn with_context_blocks(mut self, context_blocks: usize) -> Self {
        self.context_blocks = context_blocks;
        self
    }

    #[must_use]
    pub fn with_max_convergence_passes(mut self, passes: usize) -> Self {
        self.max_convergence_passes = passes;
        self
    }

    #[must_use]
    pub fn with_reference_preamble(mut self, enabled: bool) -> Self {
        self.reference_preamble = enabled;
        self
    }

    #[must_use]
    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    /// Configuration that always parses the whole document.
    pub fn full() -> Self {
        Self::default().with_incremental(false)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            context_blocks: Self::DEFAULT_CONTEXT_BLOCKS,
            max_convergence_passes: Self::DEFAULT_MAX_CONVERGENCE_PASSES,
            reference_preamble: true,
            incremental: true,
        }
    }
}
