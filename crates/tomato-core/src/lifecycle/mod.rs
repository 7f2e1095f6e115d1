//! # System Lifecycle
//!
//! Startup and shutdown for the delivery client: configuration, tracing and
//! the actor-backed stores the client-side services talk to.
//!
//! ## Wiring
//!
//! Actors are created first and then started with their context injected
//! through `run(context)`. Neither store depends on another, so both run
//! with `Context = ()`:
//!
//! ```rust,ignore
//! let (restaurant_actor, restaurant_client) = restaurant_actor::new(config.actor_buffer);
//! let (order_actor, order_client) = order_actor::new(config.actor_buffer);
//!
//! let restaurant_handle = tokio::spawn(restaurant_actor.run(()));
//! let order_handle = tokio::spawn(order_actor.run(()));
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of each actor's channel
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - [`DeliverySystem::shutdown`] joins both tasks
//!
//! Clones held by services keep an actor alive, so drop those before calling
//! [`DeliverySystem::shutdown`]. A running [`StatusPoller`](crate::tracking::StatusPoller)
//! holds an order client clone until it is stopped.
//!
//! ## Configuration
//!
//! [`load_app_config`] reads `TOMATO_*` variables (and `.env`) into an
//! [`AppConfig`]; every variable has a default.

pub mod config;
pub mod delivery_system;
pub mod tracing;

pub use config::*;
pub use delivery_system::*;
pub use self::tracing::*;
