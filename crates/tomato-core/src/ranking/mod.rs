//! # Restaurant Ranking
//!
//! Turns a reference point and a [`SearchRequest`] into an ordered, annotated
//! restaurant list.
//!
//! - [`pipeline`] - the pure dedupe/annotate/filter/sort stages
//! - [`service`] - [`RankingService`], which fetches candidates from a
//!   [`RestaurantStore`](crate::clients::RestaurantStore) and runs the pipeline
//! - [`session`] - [`SearchSession`], which discards stale responses
//! - [`highlights`] - top-rated list, catalogue statistics, single distances

pub mod highlights;
pub mod pipeline;
pub mod service;
pub mod session;

pub use highlights::*;
pub use pipeline::*;
pub use service::*;
pub use session::*;
