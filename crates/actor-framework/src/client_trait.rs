//! # ActorClient Trait
//!
//! Shared read plumbing for resource-specific client wrappers.

use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Implemented by wrappers such as an `OrderClient` that hold a
/// [`ResourceClient`] and speak their own error type.
///
/// Implementors supply `inner` and `map_error`; `get` and `list` come for
/// free.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// The wrapped generic client.
    fn inner(&self) -> &ResourceClient<T>;

    /// Converts a framework failure into the wrapper's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch one entity by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity in creation order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
