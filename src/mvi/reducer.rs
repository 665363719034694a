//! Reducer trait for MVI architecture.

use super::effect::Effect;
use super::state::UiState;

/// Reducer transforms state based on effects.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Effect) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The effect type this reducer handles.
    type Effect: Effect;

    /// Fold an effect into the state and return the new state.
    ///
    /// This should be a pure function with no side effects. `&self` only
    /// carries construction-time policy, never mutable data.
    fn reduce(&self, state: Self::State, effect: Self::Effect) -> Self::State;
}
