//! Post-processor trait for MVI architecture.

use super::effect::Effect;
use super::intent::Intent;
use super::state::UiState;

/// Decides whether an applied effect should trigger a follow-up intent.
///
/// Called once per `(intent, effect, new state)` triple, after the reducer
/// has run. Returned intents are fed back into the actor.
pub trait PostProcessor {
    type Intent: Intent;
    type Effect: Effect;
    type State: UiState;

    fn process(
        intent: &Self::Intent,
        effect: &Self::Effect,
        state: &Self::State,
    ) -> Option<Self::Intent>;
}
