//! # Path Model
//!
//! Values that describe where the next leaf will be written.
//! A `DefinitionPath` is an ordered list of `PathElement` steps from the
//! implicit document root down to the innermost scope.
//!
//! Design rule: NO sink types here. This module is pure data: no I/O, no state.

pub mod element;
pub mod path;

pub use element::PathElement;
pub use path::DefinitionPath;
