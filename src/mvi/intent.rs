//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (typing, clearing the search box)
/// - System events (start-of-day bootstrap)
/// - Follow-ups synthesized by a post-processor
///
/// Intents are handled by an actor, which turns them into effects.
pub trait Intent: Send + 'static {}
