//! Engine handles owning the parser, the tokenizer registry and the state.

use ink_ir::DecorationLine;
use ink_lexer::{Languages, TokenizerRegistry};
use ink_parse::{MarkdownParser, StructuralParser};
use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::report::UpdateReport;
use crate::state::EngineState;

/// A decoration engine for one editing session.
///
/// Calls are synchronous and must not overlap; see [`SharedEngine`] for
/// hosts that call in from several threads.
pub struct Engine<P = MarkdownParser, R = Languages> {
    parser: P,
    registry: R,
    config: EngineConfig,
    state: EngineState,
}

impl Engine {
    /// GFM parser, built-in tokenizers, default configuration.
    pub fn new() -> Self {
        Engine::with_parts(
            MarkdownParser::new(),
            Languages::builtin(),
            EngineConfig::default(),
        )
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, R> Engine<P, R>
where
    P: StructuralParser,
    R: TokenizerRegistry,
{
    pub fn with_parts(parser: P, registry: R, config: EngineConfig) -> Self {
        Engine {
            parser,
            registry,
            config,
            state: EngineState::new(),
        }
    }

    /// Bring the state up to date with `text`.
    ///
    /// On error the previous state is kept.
    pub fn update(&mut self, text: &str) -> Result<UpdateReport, EngineError> {
        let (state, report) =
            self.state
                .update(text, &self.parser, &self.registry, &self.config)?;
        self.state = state;
        Ok(report)
    }

    /// Decorate `text` from empty state with this engine's parser and
    /// tokenizers, without touching the session state.
    pub fn decorate_from_scratch(&self, text: &str) -> Result<EngineState, EngineError> {
        EngineState::from_text(text, &self.parser, &self.registry)
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Labels of 1-based `line`, marking it decorated.
    pub fn line_decorations(&mut self, line: usize) -> Option<DecorationLine> {
        self.state.line_decorations(line)
    }

    pub fn is_fully_decorated(&self) -> bool {
        self.state.is_fully_decorated()
    }

    /// Forget the document; the next update decorates from scratch.
    pub fn reset(&mut self) {
        self.state = EngineState::new();
    }

    pub fn into_state(self) -> EngineState {
        self.state
    }
}

/// An [`Engine`] behind one mutex.
///
/// Updates are not split into smaller units, so a single lock around the
/// whole engine serializes them.
pub struct SharedEngine<P = MarkdownParser, R = Languages> {
    inner: Mutex<Engine<P, R>>,
}

impl<P, R> SharedEngine<P, R>
where
    P: StructuralParser,
    R: TokenizerRegistry,
{
    pub fn new(engine: Engine<P, R>) -> Self {
        SharedEngine {
            inner: Mutex::new(engine),
        }
    }

    pub fn update(&self, text: &str) -> Result<UpdateReport, EngineError> {
        self.inner.lock().update(text)
    }

    pub fn line_decorations(&self, line: usize) -> Option<DecorationLine> {
        self.inner.lock().line_decorations(line)
    }

    pub fn is_fully_decorated(&self) -> bool {
        self.inner.lock().is_fully_decorated()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> EngineState {
        self.inner.lock().state().clone()
    }

    /// Run `f` against the current state under the lock.
    pub fn with_state<T>(&self, f: impl FnOnce(&EngineState) -> T) -> T {
        f(self.inner.lock().state())
    }

    pub fn into_inner(self) -> Engine<P, R> {
        self.inner.into_inner()
    }
}

impl<P, R> From<Engine<P, R>> for SharedEngine<P, R>
where
    P: StructuralParser,
    R: TokenizerRegistry,
{
    fn from(engine: Engine<P, R>) -> Self {
        SharedEngine::new(engine)
    }
}
