//! PathElement — one step of nesting identity.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single nesting step.
///
/// Two elements are the same step iff their `name`s compare equal. The
/// `unique` and `requires_id` flags describe how the step may be used but do
/// not take part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathElement<N> {
    pub name: N,
    /// Once closed, this scope may not be re-entered by a later path.
    #[serde(default)]
    pub unique: bool,
    /// The scope carries a generated identifier when ID generation is enabled.
    #[serde(default)]
    pub requires_id: bool,
}

impl<N> PathElement<N> {
    /// A reusable step.
    pub fn new(name: N) -> Self {
        Self { name, unique: false, requires_id: false }
    }

    /// A single-use step.
    pub fn unique(name: N) -> Self {
        Self { name, unique: true, requires_id: false }
    }

    pub fn with_id_required(mut self) -> Self {
        self.requires_id = true;
        self
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn name(&self) -> &N {
        &self.name
    }
}

impl<N: PartialEq> PartialEq for PathElement<N> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<N: Eq> Eq for PathElement<N> {}

impl<N: Hash> Hash for PathElement<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<N: fmt::Display> fmt::Display for PathElement<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.unique {
            write!(f, "!")?;
        }
        Ok(())
    }
}

impl<N> From<N> for PathElement<N> {
    fn from(name: N) -> Self {
        Self::new(name)
    }
}
