//! Stream driver — write a whole sequence of leaf values.
//!
//! Each item pairs the path a value belongs at with the value itself. The
//! driver descends to the path, hands the descent to the caller to write the
//! value, and closes the last descent when the items run out.

use std::fmt::Display;

use crate::config::DescentConfig;
use crate::model::DefinitionPath;
use crate::sink::ScopeSink;
use crate::Result;
use super::{Descent, Transition};

/// Counters for one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Leaf values written.
    pub values: usize,
    pub opens: usize,
    pub closes: usize,
    /// Transitions that kept the previous scopes exactly as they were.
    pub reused: usize,
    pub max_depth: usize,
}

impl StreamSummary {
    fn record(&mut self, transition: &Transition, depth: usize) {
        self.values += 1;
        self.opens += transition.open;
        self.closes += transition.close;
        if transition.is_noop() {
            self.reused += 1;
        }
        self.max_depth = self.max_depth.max(depth);
    }
}

/// Write every `(path, value)` item, then close whatever is still open.
///
/// An error from a transition, from `write_leaf` or from the final close
/// aborts the stream. Operations already emitted are not undone.
pub fn write_paths<'w, N, S, T, I, F>(
    sink: &'w mut S,
    config: DescentConfig,
    items: I,
    mut write_leaf: F,
) -> Result<StreamSummary>
where
    N: PartialEq + Display,
    S: ScopeSink<N> + ?Sized,
    I: IntoIterator<Item = (DefinitionPath<N>, T)>,
    F: FnMut(&mut Descent<'w, N, S>, T) -> Result<()>,
{
    let mut summary = StreamSummary::default();
    let mut descent = Descent::with_config(sink, config);

    for (path, value) in items {
        let (next, transition) = descent.transition(path)?;
        descent = next;
        summary.record(&transition, descent.depth());
        write_leaf(&mut descent, value)?;
    }

    summary.closes += descent.depth();
    descent.close()?;

    tracing::debug!(
        values = summary.values,
        opens = summary.opens,
        closes = summary.closes,
        reused = summary.reused,
        "stream finished"
    );
    Ok(summary)
}
