//! Transition planning — which scopes to close and which to open.
//!
//! Planning is a pure function of the previous and the next path. Nothing is
//! written until the whole transition has been validated, so an
//! `IllegalSequencing` error never leaves half-applied operations behind.
//!
//! ```text
//! previous: member / Polygon / exterior / LinearRing
//! next:     member / Polygon / interior / LinearRing
//!                    ^ pivot (deepest shared step)
//! close LinearRing, exterior  →  open interior, LinearRing
//! ```

use std::fmt::Display;

use crate::model::DefinitionPath;
use crate::{Error, Result};

/// Where the retained prefix of the previous path ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeMarker {
    /// The next path is empty; every open scope is closed.
    Collapse,
    /// Nothing was open; every step of the next path is opened.
    Initial,
    /// The paths share no leading step.
    Disjoint,
    /// The deepest shared step is reusable and stays open (index into both paths).
    Pivot(usize),
    /// The deepest shared step is unique; it stays open and blocks reopening.
    Barrier(usize),
}

/// A planned move from one path to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Innermost scopes of the previous path to close.
    pub close: usize,
    /// Leading steps kept open; also where opening starts in the next path.
    pub retain: usize,
    /// Steps of the next path to open.
    pub open: usize,
    pub marker: ResumeMarker,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        self.close == 0 && self.open == 0
    }

    /// Total sink operations this transition performs.
    pub fn operations(&self) -> usize {
        self.close + self.open
    }
}

/// Plan the move from `previous` to `next`.
///
/// The retained prefix is the longest run of leading steps equal in both
/// paths. Its last step is the resume marker: a pivot when reusable, a
/// barrier when unique. When that barrier is the previous leaf nothing below
/// it can be closed, so the plan falls back to the deepest reusable shared
/// ancestor and reopens the unique step under it. With no reusable shared
/// step to fall back to, the paths cannot be sequenced.
pub fn plan<N>(previous: &DefinitionPath<N>, next: &DefinitionPath<N>) -> Result<Transition>
where
    N: PartialEq + Display,
{
    if next.is_empty() {
        return Ok(Transition {
            close: previous.len(),
            retain: 0,
            open: 0,
            marker: ResumeMarker::Collapse,
        });
    }

    let (retain, marker) = if previous.is_empty() {
        (0, ResumeMarker::Initial)
    } else {
        let shared = previous.common_prefix_len(next);
        let prev = previous.steps();
        match shared.checked_sub(1) {
            None => (0, ResumeMarker::Disjoint),
            Some(at) if !prev[at].is_unique() => (shared, ResumeMarker::Pivot(at)),
            Some(at) if shared < prev.len() => (shared, ResumeMarker::Barrier(at)),
            Some(at) => match prev[..at].iter().rposition(|step| !step.is_unique()) {
                Some(pivot) => (pivot + 1, ResumeMarker::Pivot(pivot)),
                None => {
                    return Err(illegal(
                        previous,
                        next,
                        format!(
                            "only unique steps are shared and '{}' cannot be closed without being reopened",
                            prev[at]
                        ),
                    ));
                }
            },
        }
    };

    let close = previous.len() - retain;

    let steps = next.steps();
    for (i, step) in steps.iter().enumerate().skip(retain) {
        if step.is_unique() && steps[..i].contains(step) {
            return Err(illegal(
                previous,
                next,
                format!("unique step '{}' would be entered while already open", step),
            ));
        }
    }

    Ok(Transition {
        close,
        retain,
        open: next.len() - retain,
        marker,
    })
}

fn illegal<N: Display>(previous: &DefinitionPath<N>, next: &DefinitionPath<N>, reason: String) -> Error {
    tracing::warn!(previous = %previous, next = %next, %reason, "illegal path sequencing");
    Error::IllegalSequencing {
        previous: previous.to_string(),
        next: next.to_string(),
        reason,
    }
}
