//! Base trait for effects (actor outcomes) in MVI architecture.

/// Marker trait for effect objects.
///
/// Effects are ephemeral: each one is folded into the state exactly once
/// and then offered to the post-processor.
pub trait Effect: Send + 'static {}
