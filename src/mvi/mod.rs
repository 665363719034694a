//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides base traits for implementing unidirectional
//! data flow between a presentation layer and an effectful feature.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Actor ──→ Effect ──→ Reducer ──→ State ──→ View
//!    ↑                                 │
//!    └────────── PostProcessor ←───────┘
//! ```
//!
//! - **State**: Immutable snapshot of everything the view renders
//! - **Intent**: User actions or system events
//! - **Effect**: Outcome produced by the actor while handling an intent
//! - **Reducer**: Pure function folding an effect into the next state
//! - **PostProcessor**: Pure function that may synthesize a follow-up intent

mod effect;
mod intent;
mod post_processor;
mod reducer;
mod state;

pub use effect::Effect;
pub use intent::Intent;
pub use post_processor::PostProcessor;
pub use reducer::Reducer;
pub use state::UiState;
