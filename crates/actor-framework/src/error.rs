//! # Framework Errors
//!
//! Failures of the message plumbing itself, plus a boxed slot that carries an
//! entity's own error back to the caller.

/// Errors returned by [`ResourceClient`](crate::ResourceClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Returns the entity error carried by [`FrameworkError::EntityError`] if
    /// it is of type `E`.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
