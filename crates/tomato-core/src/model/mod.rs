//! # Domain Model
//!
//! Plain data types shared by the actors, the services and the client-side
//! aggregates. [`Restaurant`] and [`Order`] are also the entities owned by
//! the restaurant and order actors; their `ActorEntity` impls live in
//! [`crate::restaurant_actor`] and [`crate::order_actor`].

pub mod money;
pub mod order;
pub mod restaurant;

pub use money::*;
pub use order::*;
pub use restaurant::*;
