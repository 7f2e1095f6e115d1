//! # Requests
//!
//! The message set exchanged between [`ResourceClient`](crate::ResourceClient)
//! and [`ResourceActor`](crate::ResourceActor). Each variant carries a oneshot
//! sender for the reply.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Reply channel for a single request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A request addressed to the actor owning every `T`.
///
/// Create, Get, List and Update cover the resource lifecycle; Action carries
/// the entity-specific operations declared by [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
