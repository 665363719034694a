use crate::mvi::Effect;
use crate::translation::{SourceError, Translation};

/// Outcomes produced by the search actor.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEffect {
    QueryUpdated { query: String, submit_allowed: bool },
    ResultsCleared,
    SubmissionStarted,
    /// An in-flight lookup was superseded by newer input.
    SubmissionCancelled,
    ResultsReceived(Vec<Translation>),
    SubmissionFailed(SourceError),
}

impl Effect for SearchEffect {}
