//! DefinitionPath — the ordered steps from the document root to a leaf.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::PathElement;

/// Inline capacity; deeper paths spill to the heap.
const INLINE_STEPS: usize = 8;

/// A path through the output tree: root -> ... -> leaf.
///
/// Ancestors come before descendants. An empty path means "no nesting".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionPath<N> {
    steps: SmallVec<[PathElement<N>; INLINE_STEPS]>,
}

impl<N> DefinitionPath<N> {
    pub fn new(steps: impl IntoIterator<Item = PathElement<N>>) -> Self {
        Self { steps: steps.into_iter().collect() }
    }

    pub fn empty() -> Self {
        Self { steps: SmallVec::new() }
    }

    pub fn steps(&self) -> &[PathElement<N>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The innermost step, if any.
    pub fn leaf(&self) -> Option<&PathElement<N>> {
        self.steps.last()
    }

    /// Extend the path by one step.
    pub fn child(mut self, step: PathElement<N>) -> Self {
        self.steps.push(step);
        self
    }
}

impl<N: PartialEq> DefinitionPath<N> {
    pub fn contains(&self, step: &PathElement<N>) -> bool {
        self.steps.contains(step)
    }

    /// Number of leading steps both paths share, compared position by position.
    pub fn common_prefix_len(&self, other: &Self) -> usize {
        self.steps
            .iter()
            .zip(other.steps.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }
}

impl<N: Clone> DefinitionPath<N> {
    /// The path without its leaf. The parent of an empty path is empty.
    pub fn parent(&self) -> Self {
        let end = self.steps.len().saturating_sub(1);
        Self { steps: self.steps[..end].iter().cloned().collect() }
    }
}

impl<N> Default for DefinitionPath<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<N> FromIterator<PathElement<N>> for DefinitionPath<N> {
    fn from_iter<I: IntoIterator<Item = PathElement<N>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<N> From<Vec<PathElement<N>>> for DefinitionPath<N> {
    fn from(steps: Vec<PathElement<N>>) -> Self {
        Self::new(steps)
    }
}

impl<N: fmt::Display> fmt::Display for DefinitionPath<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "/");
        }
        for step in &self.steps {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}
