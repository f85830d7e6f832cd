//! # scope-descent — Streaming Hierarchical-Path Descent
//!
//! Drives a nested-structure writer (XML, markup, any scope emitter) through a
//! sequence of target nesting paths, emitting only the open/close operations
//! needed to get from one path to the next.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `ScopeSink` is the contract between the descent engine and the writer
//! 2. **Paths are values**: `DefinitionPath` is immutable, compared by step identity
//! 3. **Planning is pure**: a transition is computed before the sink is touched
//! 4. **Linear ownership**: a `Descent` is consumed by every transition and by `close`
//!
//! ## Quick Start
//!
//! ```rust
//! use scope_descent::{DefinitionPath, Descent, PathElement, RecordingSink};
//!
//! # fn example() -> scope_descent::Result<()> {
//! let mut sink: RecordingSink<&str> = RecordingSink::new();
//!
//! let first: DefinitionPath<&str> = [PathElement::new("a"), PathElement::new("b")]
//!     .into_iter()
//!     .collect();
//! let second = first.parent().child(PathElement::new("c"));
//!
//! let descent = Descent::begin(&mut sink).descend(first)?;
//! let descent = descent.descend(second)?;
//! descent.close()?;
//!
//! assert_eq!(sink.depth(), 0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Sinks
//!
//! | Sink | Module | Description |
//! |------|--------|-------------|
//! | `RecordingSink` | `sink::memory` | In-memory op log for testing/embedding |
//! | `MarkupSink` | `sink::markup` | Tag writer over any `std::io::Write` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod sink;
pub mod descent;
pub mod config;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{DefinitionPath, PathElement};

// ============================================================================
// Re-exports: Sinks
// ============================================================================

pub use sink::{ScopeSink, OpenOptions, RecordingSink, SinkOp, MarkupSink};

// ============================================================================
// Re-exports: Descent
// ============================================================================

pub use descent::{Descent, Transition, ResumeMarker};
pub use descent::stream::{write_paths, StreamSummary};

// ============================================================================
// Re-exports: Configuration
// ============================================================================

pub use config::{DescentConfig, MarkupConfig};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two consecutive paths cannot be sequenced on the same sink without
    /// re-entering a unique scope.
    #[error("Illegal sequencing from '{previous}' to '{next}': {reason}")]
    IllegalSequencing {
        previous: String,
        next: String,
        reason: String,
    },

    #[error("Sink error: {0}")]
    SinkError(String),

    #[error("Contract violation: {0}")]
    Misuse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
