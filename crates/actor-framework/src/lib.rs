//! # Actor Framework
//!
//! Building blocks for resource-oriented actors on top of Tokio.
//!
//! A resource (a restaurant, an order, ...) is described once by implementing
//! [`ActorEntity`]. The generic [`ResourceActor`] owns every instance of that
//! resource inside a single task and serves Create / Get / List / Update /
//! Action requests one at a time, so the store never needs a lock.
//! Callers talk to it through a cloneable [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - validation and state transitions of one resource
//! 2. **Runtime** ([`ResourceActor`]) - the message loop and the ordered store
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed request/response calls
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Dish {
//!     id: u32,
//!     name: String,
//!     price: f64,
//! }
//!
//! #[derive(Debug)] struct DishCreate { name: String, price: f64 }
//! #[derive(Debug)] struct DishUpdate { price: f64 }
//! #[derive(Debug)] enum DishAction {}
//! #[derive(Debug, thiserror::Error)] #[error("{0}")] struct DishError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Dish {
//!     type Id = u32;
//!     type Create = DishCreate;
//!     type Update = DishUpdate;
//!     type Action = DishAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = DishError;
//!
//!     fn from_create_params(id: u32, params: DishCreate) -> Result<Self, Self::Error> {
//!         if params.price < 0.0 {
//!             return Err(DishError("negative price".into()));
//!         }
//!         Ok(Self { id, name: params.name, price: params.price })
//!     }
//!
//!     async fn on_update(&mut self, update: DishUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         self.price = update.price;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: DishAction, _ctx: &()) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Dish>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(DishCreate { name: "Dal".into(), price: 4.5 }).await.unwrap();
//!     client.update(id, DishUpdate { price: 5.0 }).await.unwrap();
//!
//!     let all = client.list().await.unwrap();
//!     assert_eq!(all.len(), 1);
//!     assert_eq!(all[0].price, 5.0);
//! }
//! ```
//!
//! ## Context injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to `new`, so
//! actors can be created first and wired afterwards. Every hook receives the
//! context by reference.
//!
//! ## Testing
//!
//! The [`mock`] module serves a [`ResourceClient`] from canned expectations,
//! which lets code built on top of a client be tested without a real actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
