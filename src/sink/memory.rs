//! In-memory recording sink.
//!
//! This is the reference implementation of `ScopeSink`.
//! It keeps the stack of open scopes and a log of every operation, so the
//! exact open/close sequence produced by the engine can be inspected.
//!
//! ## Limitations
//!
//! - **Unbounded log**: every operation is kept until `take_ops()` or `clear()`.
//! - **No content**: leaf values are not recorded, only scope structure.
//!
//! Use this sink for:
//! - Testing transition planning and stack discipline
//! - Dry-running a stream to count writes before touching a real writer

use crate::model::PathElement;
use crate::{Error, Result};
use super::{OpenOptions, ScopeSink};

// ============================================================================
// SinkOp
// ============================================================================

/// One recorded sink operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOp<N> {
    Open { name: N, id_requested: bool },
    /// `name` is the step the closed scope was opened for.
    Close { name: N },
}

impl<N> SinkOp<N> {
    pub fn is_open(&self) -> bool {
        matches!(self, SinkOp::Open { .. })
    }

    pub fn name(&self) -> &N {
        match self {
            SinkOp::Open { name, .. } | SinkOp::Close { name } => name,
        }
    }
}

// ============================================================================
// RecordingSink
// ============================================================================

/// Sink that records operations instead of writing them anywhere.
#[derive(Debug, Clone)]
pub struct RecordingSink<N> {
    stack: Vec<PathElement<N>>,
    ops: Vec<SinkOp<N>>,
    /// Operation index (0-based, counted over the sink's lifetime) that fails.
    fail_at: Option<usize>,
    performed: usize,
}

impl<N> RecordingSink<N> {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            ops: Vec::new(),
            fail_at: None,
            performed: 0,
        }
    }

    /// Make the `index`-th operation fail with `Error::SinkError`.
    ///
    /// Used to check that failures surface unchanged through the engine.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn ops(&self) -> &[SinkOp<N>] {
        &self.ops
    }

    /// Drain the operation log, keeping the open stack intact.
    pub fn take_ops(&mut self) -> Vec<SinkOp<N>> {
        std::mem::take(&mut self.ops)
    }

    /// Currently open scopes, outermost first.
    pub fn open_scopes(&self) -> &[PathElement<N>] {
        &self.stack
    }

    pub fn opens(&self) -> usize {
        self.ops.iter().filter(|op| op.is_open()).count()
    }

    pub fn closes(&self) -> usize {
        self.ops.len() - self.opens()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
        self.ops.clear();
    }

    fn check_failure(&mut self) -> Result<()> {
        let index = self.performed;
        self.performed += 1;
        if self.fail_at == Some(index) {
            return Err(Error::SinkError(format!("injected failure at operation {}", index)));
        }
        Ok(())
    }
}

impl<N> Default for RecordingSink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone> ScopeSink<N> for RecordingSink<N> {
    fn open(&mut self, step: &PathElement<N>, options: OpenOptions) -> Result<()> {
        self.check_failure()?;
        self.ops.push(SinkOp::Open {
            name: step.name.clone(),
            id_requested: options.generate_id && step.requires_id,
        });
        self.stack.push(step.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let Some(step) = self.stack.pop() else {
            return Err(Error::Misuse("close called with no open scope".into()));
        };
        if let Err(e) = self.check_failure() {
            self.stack.push(step);
            return Err(e);
        }
        self.ops.push(SinkOp::Close { name: step.name });
        Ok(())
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }
}
