//! # Location Acquisition
//!
//! Resolves the single active [`ReferencePoint`] from one of three competing
//! sources: the device's location capability, a pick on the map, or a free
//! text query. The point is a tagged union, so two sources can never be
//! active at once, and it is persisted under
//! [`REFERENCE_POINT_KEY`](crate::storage::REFERENCE_POINT_KEY) so a restart
//! restores it without asking the device again.
//!
//! ## Structure
//!
//! - [`point`] - [`ReferencePoint`] and its [`PointSource`]
//! - [`controller`] - [`LocationController`] and the [`Geolocator`] seam
//! - [`error`] - [`LocationError`] and [`PositionError`]

pub mod controller;
pub mod error;
pub mod point;

pub use controller::*;
pub use error::*;
pub use point::*;
