use crate::mvi::Intent;

/// Intents accepted by the search feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    /// Start-of-day bootstrap: opens the debounced submission gate.
    Initialize,
    /// Search box text changed. Aborts any outstanding lookup.
    UpdateQuery(String),
    /// Offer `text` to the debounced submission gate.
    ScheduleSubmit(String),
    /// Search box cleared. Aborts any outstanding lookup and resets state.
    Clear,
}

impl Intent for SearchIntent {}
