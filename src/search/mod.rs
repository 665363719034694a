//! Interactive dictionary search.
//!
//! Typed text flows through the actor (validation, debounce, lookup), the
//! reducer folds each outcome into a [`SearchState`], and the post-processor
//! schedules a debounced lookup whenever the typed text is valid.

mod actor;
mod debounce;
mod effect;
mod feature;
mod intent;
mod post_processor;
mod reducer;
mod state;
mod store;
mod validator;

pub use actor::{ActorChannels, LookupFinished, SearchActor};
pub use debounce::{Debouncer, Fired};
pub use effect::SearchEffect;
pub use feature::{SearchConfig, SearchFeature};
pub use intent::SearchIntent;
pub use post_processor::SearchPostProcessor;
pub use reducer::SearchReducer;
pub use state::{RequestPhase, SearchState};
pub use store::{StateStore, StateSubscription};
pub use validator::{QueryValidator, ValidatorError};
