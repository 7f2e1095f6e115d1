//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient),
//! plus the store traits the services are written against.

pub mod order_client;
pub mod restaurant_client;
pub mod traits;

pub use order_client::*;
pub use restaurant_client::*;
pub use traits::*;
