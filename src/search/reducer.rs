use crate::config::FailurePolicy;
use crate::mvi::Reducer;
use crate::search::effect::SearchEffect;
use crate::search::state::{RequestPhase, SearchState};

/// Folds search effects into the next state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchReducer {
    failure_policy: FailurePolicy,
}

impl SearchReducer {
    pub fn new(failure_policy: FailurePolicy) -> Self {
        Self { failure_policy }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}

impl Reducer for SearchReducer {
    type State = SearchState;
    type Effect = SearchEffect;

    fn reduce(&self, state: Self::State, effect: Self::Effect) -> Self::State {
        match effect {
            SearchEffect::QueryUpdated {
                query,
                submit_allowed,
            } => SearchState {
                query: Some(query),
                submit_allowed,
                ..state
            },
            SearchEffect::SubmissionStarted => SearchState {
                phase: RequestPhase::Running,
                ..state
            },
            // A superseded lookup keeps whatever the user typed.
            SearchEffect::SubmissionCancelled => SearchState {
                phase: RequestPhase::Idle,
                ..state
            },
            SearchEffect::ResultsReceived(results) => SearchState {
                results: Some(results),
                phase: RequestPhase::Idle,
                ..state
            },
            SearchEffect::SubmissionFailed(cause) => match self.failure_policy {
                FailurePolicy::ResetContext => SearchState {
                    query: None,
                    results: None,
                    phase: RequestPhase::Failed(cause),
                    ..state
                },
                FailurePolicy::KeepContext => SearchState {
                    phase: RequestPhase::Failed(cause),
                    ..state
                },
            },
            SearchEffect::ResultsCleared => SearchState::default(),
        }
    }
}
