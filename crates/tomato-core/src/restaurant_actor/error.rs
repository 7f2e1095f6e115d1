//! Error types for the Restaurant actor.

use thiserror::Error;

/// Errors that can occur during restaurant operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RestaurantError {
    /// The requested restaurant was not found.
    #[error("Restaurant not found: {0}")]
    NotFound(String),

    /// The restaurant or menu data provided is invalid.
    #[error("Restaurant validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
