//! Non-fatal usage diagnostics.
//!
//! Bar plots and gradients never abort a render pass on bad input. Problems
//! that leave the operation as a no-op (or clamp to a safe value) are handed to
//! an injected [`DiagnosticSink`] instead.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::warn;

use crate::core::{GroupId, SeriesId};

/// Usage problem reported by a bar plot or a color gradient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error("series {series:?} is already a member of group {group:?}")]
    DuplicateGroupMember { group: GroupId, series: SeriesId },

    #[error("series {series:?} is not a member of group {group:?}")]
    NotInGroup { group: GroupId, series: SeriesId },

    #[error("index {index} out of bounds for group {group:?} with {len} members")]
    GroupIndexOutOfBounds {
        group: GroupId,
        index: usize,
        len: usize,
    },

    #[error("series {series:?} and {target:?} do not share key and value axes")]
    StackAxisMismatch { series: SeriesId, target: SeriesId },

    #[error("level count must be >= 2 but was {requested}, clamped to {applied}")]
    LevelCountClamped { requested: usize, applied: usize },

    #[error("keys and values have different lengths: {keys} vs {values}")]
    DataLengthMismatch { keys: usize, values: usize },
}

/// Receiver for [`Diagnostic`]s.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Shared sink handle as stored by plots and gradients.
pub type SharedDiagnostics = Arc<dyn DiagnosticSink>;

/// Default sink: forwards every diagnostic as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        warn!(diagnostic = ?diagnostic, "{diagnostic}");
    }
}

/// Sink that keeps diagnostics in memory, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drains recorded diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}

#[must_use]
pub fn default_diagnostics() -> SharedDiagnostics {
    Arc::new(TracingDiagnostics)
}
