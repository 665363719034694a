use crate::mvi::PostProcessor;
use crate::search::effect::SearchEffect;
use crate::search::intent::SearchIntent;
use crate::search::state::SearchState;

/// Turns "user typed a valid query" into "schedule a debounced lookup".
pub struct SearchPostProcessor;

impl PostProcessor for SearchPostProcessor {
    type Intent = SearchIntent;
    type Effect = SearchEffect;
    type State = SearchState;

    fn process(
        _intent: &Self::Intent,
        effect: &Self::Effect,
        _state: &Self::State,
    ) -> Option<Self::Intent> {
        match effect {
            SearchEffect::QueryUpdated {
                query,
                submit_allowed: true,
            } => Some(SearchIntent::ScheduleSubmit(query.clone())),
            _ => None,
        }
    }
}
