//! # Tomato Core
//!
//! The client-side core of a food-delivery app: where the user is, which
//! restaurants to show them, what is in their cart, and what happened to the
//! orders they placed.
//!
//! ## Modules
//!
//! - **[geometry]**: haversine distance and compass octants between coordinates.
//! - **[location]**: [`LocationController`](location::LocationController), the single active reference point.
//! - **[ranking]**: dedupe, radius, category and distance ordering over store results.
//! - **[cart]**: the persisted [`Cart`](cart::Cart).
//! - **[tracking]**: checkout, order history and status polling.
//! - **[payment]**: the payment gateway seam and a simulated provider.
//! - **[storage]**: durable key/value client storage.
//! - **[model]**: restaurants, menus and orders.
//! - **[restaurant_actor] / [order_actor]**: the stores, run as
//!   [`ResourceActor`](actor_framework::ResourceActor)s.
//! - **[clients]**: typed wrappers over the actors and the store traits services depend on.
//! - **[lifecycle]**: configuration, tracing and [`DeliverySystem`](lifecycle::DeliverySystem).
//!
//! ## Testing
//!
//! Services take their stores as trait objects or generics, so tests can use
//! [`actor_framework::mock`] clients or hand-written fakes instead of actors.

pub mod cart;
pub mod clients;
pub mod geometry;
pub mod lifecycle;
pub mod location;
pub mod model;
pub mod order_actor;
pub mod payment;
pub mod ranking;
pub mod restaurant_actor;
pub mod storage;
pub mod tracking;
