//! # ActorEntity Trait
//!
//! The contract a resource type fulfils so that a [`ResourceActor`](crate::ResourceActor)
//! can own it. Associated types pin down the id, the create/update payloads,
//! the custom actions and the error type, so a payload meant for one resource
//! cannot be sent to another.
//!
//! Entities write the two hooks, `on_update` and `handle_action`; creation
//! goes through `from_create_params` alone.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A resource managed by a [`ResourceActor`](crate::ResourceActor).
///
/// Hooks are async so they can talk to other actors through the injected
/// [`ActorEntity::Context`].
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier allocated by the actor from a `u32` counter.
    ///
    /// `Ord` must agree with allocation order: listing returns entities sorted
    /// by id, which is then also creation order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload used to modify an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations beyond CRUD.
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected when the actor starts. Use `()` for none.
    type Context: Send + Sync;

    /// One error enum per resource, covering every hook and action.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity from its allocated id and the create payload.
    /// Rejecting here means nothing is stored.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Applies an update in place. An error leaves the stored entity as the
    /// hook left it, so hooks should validate before mutating.
    async fn on_update(&mut self, update: Self::Update, _ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Runs a custom action against one entity.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
