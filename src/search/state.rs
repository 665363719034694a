//! State of the search feature.

use crate::mvi::UiState;
use crate::translation::{SourceError, Translation};

/// Lifecycle stage of the current lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestPhase {
    /// No lookup outstanding.
    #[default]
    Idle,

    /// Exactly one lookup is outstanding.
    Running,

    /// The last lookup failed.
    Failed(SourceError),
}

/// Snapshot of everything the search screen renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    /// Text as typed, untrimmed.
    pub query: Option<String>,
    /// Results of the last successful lookup.
    pub results: Option<Vec<Translation>>,
    /// Whether `query` passes validation.
    pub submit_allowed: bool,
    pub phase: RequestPhase,
}

impl UiState for SearchState {}

impl SearchState {
    /// Check if a lookup is in flight (spinner should be shown).
    pub fn is_running(&self) -> bool {
        matches!(self.phase, RequestPhase::Running)
    }

    /// Get the failure cause, if the last lookup failed.
    pub fn error(&self) -> Option<&SourceError> {
        match &self.phase {
            RequestPhase::Failed(cause) => Some(cause),
            _ => None,
        }
    }

    /// Results to display; empty when there are none.
    pub fn results(&self) -> &[Translation] {
        self.results.as_deref().unwrap_or(&[])
    }
}
