//! # Order Lifecycle
//!
//! Everything between a filled cart and a delivered order on the client side:
//!
//! - [`checkout`] - [`OrderManager`]: cart + payment confirmation into a
//!   persisted order, and the customer's order history
//! - [`board`] - [`OrderBoard`] and the monotonic [`merge_snapshot`]
//! - [`poller`] - [`StatusPoller`], the cancellable status refresh task
//! - [`presentation`] - status to label/icon/affordance mapping

pub mod board;
pub mod checkout;
pub mod poller;
pub mod presentation;

pub use board::*;
pub use checkout::*;
pub use poller::*;
pub use presentation::*;
