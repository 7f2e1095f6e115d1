//! # Restaurant Actor
//!
//! The restaurant store, run as a [`ResourceActor`] over [`Restaurant`]
//! entities. Each restaurant owns its menu; menu changes go through custom
//! actions so they are serialized with every other request for that
//! restaurant.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Restaurant`]
//! - [`error`] - [`RestaurantError`]
//! - [`actions`] - [`RestaurantAction`] and [`RestaurantActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use tomato_core::clients::{RestaurantClient, RestaurantStore};
//! use tomato_core::geometry::Coordinate;
//! use tomato_core::model::{NewMenuItem, RestaurantCreate};
//! use tomato_core::restaurant_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = restaurant_actor::new(32);
//!     let client = RestaurantClient::new(generic_client, None);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_restaurant(RestaurantCreate {
//!             name: "Spice Route".into(),
//!             cuisine: "North Indian".into(),
//!             rating: 4.6,
//!             price_range: "$$".into(),
//!             address: "Model Town, Hisar".into(),
//!             coordinate: Coordinate::new(29.1492, 75.7217)?,
//!             image_url: String::new(),
//!             added_at: None,
//!             menu: vec![NewMenuItem::new("Dal Makhani", 4.5)],
//!         })
//!         .await?;
//!
//!     let menu = client.menu(id).await?;
//!     assert_eq!(menu.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Restaurant;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Restaurant actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Restaurant>, ResourceClient<Restaurant>) {
    ResourceActor::new(buffer_size)
}
