//! # Preprocessing capabilities and the chain
//!
//! Two orthogonal capabilities a transformation may implement:
//!
//! - [`TermPreprocessing`] — a pure function from one [`Term`] to a new
//!   term, or to absence (`Ok(None)`) meaning the term is dropped from the
//!   output sequence, or to a fatal per-term failure.
//! - [`StringPreprocessing`] — the same shape over raw token strings, for
//!   pipelines that operate before terms exist.
//!
//! Transformations hold no mutable cross-call state and may consult
//! nothing outside their input except the read-only tag registry, which
//! makes every step safe to invoke concurrently across different terms.
//!
//! The [`RunContext`] is the one genuinely shared mutable resource of a
//! run: an append-only, thread-safe warning sink plus a cooperative
//! cancellation flag. It is an explicit per-run value threaded through the
//! chain, never ambient state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::warn;

use crate::error::{PreprocessError, StepFailure};
use crate::term::Term;

/// Per-run shared state: warning sink and cancellation flag.
///
/// Warnings accumulate append-only under a mutex; the cancellation flag is
/// checked by the pipeline between terms (never mid-term), so partial
/// output produced before cancellation is valid.
#[derive(Debug, Default)]
pub struct RunContext {
    warnings: Mutex<Vec<String>>,
    cancelled: AtomicBool,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a human-readable warning without failing the run.
    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(warning = %message, "preprocessing warning");
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(message);
        }
    }

    /// Snapshot of all warnings recorded so far.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }

    /// Requests cooperative cancellation; already-produced output stays
    /// intact.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A composable transformation over annotated terms.
pub trait TermPreprocessing: Send + Sync {
    /// Short stable name used in failure reports (e.g. `"lemmatizer"`).
    fn name(&self) -> &'static str;

    /// Transforms `term` into a new term, `Ok(None)` to drop it, or a
    /// fatal per-term failure.
    fn preprocess(&self, term: Term, ctx: &RunContext)
        -> Result<Option<Term>, PreprocessError>;

    /// Whether this step also runs on terms marked unmodifiable when the
    /// chain is not configured to preprocess them. Pure keep/drop
    /// deciders that exist to act on that flag override this.
    fn applies_to_unmodifiable(&self) -> bool {
        false
    }
}

/// A composable transformation over raw token strings. `None` drops the
/// token.
pub trait StringPreprocessing: Send + Sync {
    fn preprocess_str(&self, text: &str) -> Option<String>;
}

/// An ordered chain of term transformations, applied in configured order
/// with earlier steps feeding later ones.
///
/// Terms marked unmodifiable pass through steps unchanged unless the chain
/// is built with `process_unmodifiable(true)`; steps whose purpose is the
/// flag itself (the named-entity filter) run regardless.
pub struct PreprocessingChain {
    steps: Vec<Box<dyn TermPreprocessing>>,
    process_unmodifiable: bool,
}

impl PreprocessingChain {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            process_unmodifiable: false,
        }
    }

    pub fn process_unmodifiable(mut self, process: bool) -> Self {
        self.process_unmodifiable = process;
        self
    }

    pub fn add(mut self, step: impl TermPreprocessing + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn add_boxed(mut self, step: Box<dyn TermPreprocessing>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs `term` through every step in order. The first step returning
    /// absence ends the chain with `Ok(None)`; a failing step is reported
    /// with its name.
    pub fn apply(&self, term: Term, ctx: &RunContext) -> Result<Option<Term>, StepFailure> {
        let mut current = term;
        for step in &self.steps {
            if current.is_unmodifiable()
                && !self.process_unmodifiable
                && !step.applies_to_unmodifiable()
            {
                continue;
            }
            match step.preprocess(current, ctx) {
                Ok(Some(next)) => current = next,
                Ok(None) => return Ok(None),
                Err(source) => {
                    return Err(StepFailure {
                        step: step.name().to_string(),
                        source,
                    })
                }
            }
        }
        Ok(Some(current))
    }
}

impl Default for PreprocessingChain {
    fn default() -> Self {
        Self::new()
    }
}
