//! # Descent
//!
//! A `Descent` is the live stack of scopes a sink currently has open on
//! behalf of one path. Moving to the next path consumes the descent and
//! returns a new one; closing consumes it for good.
//!
//! ```text
//! Descent::begin(sink)          ->  (nothing open)
//!   .descend(/member/Point/pos) ->  <member><Point><pos>
//!   .descend(/member/Point/pos) ->  (reused, nothing written)
//!   .descend(/member/LineString/posList)
//!                               ->  </pos></Point><LineString><posList>
//!   .close()                    ->  </posList></LineString></member>
//! ```
//!
//! The sink is borrowed exclusively for the lifetime of the stream, so only
//! one descent can drive it at a time.

pub mod transition;
pub mod stream;

use std::fmt::Display;

use crate::config::DescentConfig;
use crate::model::DefinitionPath;
use crate::sink::ScopeSink;
use crate::{Error, Result};

pub use transition::{plan, ResumeMarker, Transition};

/// Scopes opened in a sink for one path.
pub struct Descent<'w, N, S: ?Sized> {
    sink: &'w mut S,
    path: DefinitionPath<N>,
    config: DescentConfig,
}

impl<'w, N, S> Descent<'w, N, S>
where
    N: PartialEq + Display,
    S: ScopeSink<N> + ?Sized,
{
    /// The empty descent that precedes the first transition.
    pub fn begin(sink: &'w mut S) -> Self {
        Self::with_config(sink, DescentConfig::default())
    }

    pub fn with_config(sink: &'w mut S, config: DescentConfig) -> Self {
        Self {
            sink,
            path: DefinitionPath::empty(),
            config,
        }
    }

    pub fn path(&self) -> &DefinitionPath<N> {
        &self.path
    }

    /// Number of scopes this descent holds open.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn config(&self) -> &DescentConfig {
        &self.config
    }

    /// The sink, for writing leaf content inside the innermost scope.
    pub fn sink(&mut self) -> &mut S {
        self.sink
    }

    /// Move to `next`, closing and opening only what differs.
    pub fn descend(self, next: DefinitionPath<N>) -> Result<Self> {
        self.transition(next).map(|(descent, _)| descent)
    }

    /// Like `descend`, also reporting the transition that was applied.
    pub fn transition(self, next: DefinitionPath<N>) -> Result<(Self, Transition)> {
        let planned = transition::plan(&self.path, &next)?;
        self.check_sink()?;

        let Descent { sink, path, config } = self;

        for step in path.steps()[planned.retain..].iter().rev() {
            tracing::trace!(step = %step, depth = sink.depth(), "close scope");
            sink.close()?;
        }

        let options = config.open_options();
        for step in &next.steps()[planned.retain..] {
            tracing::trace!(step = %step, depth = sink.depth(), "open scope");
            sink.open(step, options)?;
        }

        tracing::debug!(
            from = %path,
            to = %next,
            marker = ?planned.marker,
            closed = planned.close,
            opened = planned.open,
            "descended"
        );

        Ok((Descent { sink, path: next, config }, planned))
    }

    /// Close every scope this descent holds, innermost first.
    ///
    /// Returns the sink so the caller can finish the document.
    pub fn close(self) -> Result<&'w mut S> {
        if self.path.is_empty() {
            return Ok(self.sink);
        }
        self.check_sink()?;

        let Descent { sink, path, .. } = self;
        for step in path.steps().iter().rev() {
            tracing::trace!(step = %step, depth = sink.depth(), "close scope");
            sink.close()?;
        }
        tracing::debug!(path = %path, closed = path.len(), "descent closed");
        Ok(sink)
    }

    /// The sink must still hold at least the scopes this descent opened.
    fn check_sink(&self) -> Result<()> {
        let open = self.sink.depth();
        if open < self.path.len() {
            return Err(Error::Misuse(format!(
                "sink has {} open scopes but descent '{}' holds {}",
                open,
                self.path,
                self.path.len()
            )));
        }
        Ok(())
    }
}

impl<N: Display, S: ?Sized> std::fmt::Debug for Descent<'_, N, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descent")
            .field("path", &format_args!("{}", self.path))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
