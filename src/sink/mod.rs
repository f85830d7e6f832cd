//! # Scope Sink Trait
//!
//! This is THE contract between the descent engine and any nested writer.
//! The engine only ever asks a sink to open a scope for a step or to close
//! the innermost open scope.
//!
//! ## Implementations
//!
//! | Sink | Module | Description |
//! |------|--------|-------------|
//! | `RecordingSink` | `memory` | Records every operation, for testing/embedding |
//! | `MarkupSink` | `markup` | Writes start/end tags to a `std::io::Write` |

pub mod memory;
pub mod markup;

use crate::model::PathElement;
use crate::Result;

pub use memory::{RecordingSink, SinkOp};
pub use markup::MarkupSink;

// ============================================================================
// Open options
// ============================================================================

/// Per-call options passed along with every `open`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenOptions {
    /// Emit a generated identifier for steps that require one.
    pub generate_id: bool,
}

// ============================================================================
// ScopeSink Trait
// ============================================================================

/// A writer that can be driven through nested scopes.
///
/// Sinks keep a stack of open scopes. The engine guarantees it never closes
/// more scopes than it opened, but a sink should still reject a `close` on an
/// empty stack with `Error::Misuse`.
pub trait ScopeSink<N> {
    /// Begin a nested scope for `step` inside the innermost open scope.
    fn open(&mut self, step: &PathElement<N>, options: OpenOptions) -> Result<()>;

    /// End the innermost open scope.
    fn close(&mut self) -> Result<()>;

    /// Number of currently open scopes.
    fn depth(&self) -> usize;
}

impl<N, S: ScopeSink<N> + ?Sized> ScopeSink<N> for &mut S {
    fn open(&mut self, step: &PathElement<N>, options: OpenOptions) -> Result<()> {
        (**self).open(step, options)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn depth(&self) -> usize {
        (**self).depth()
    }
}
