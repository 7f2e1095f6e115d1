//! # Tracing Setup
//!
//! Structured logging for the whole client. Services and resource clients
//! open spans through `#[instrument]`, the actors log each request inside
//! their own span, and the status poller runs inside a `status_poll` span
//! tagged with the customer. A checkout at `info` looks like:
//!
//! ```text
//! INFO checkout{customer=cust_1}:create{customer=cust_1}: Sending create_order to actor
//! INFO checkout{customer=cust_1}: Order placed order_id=order_1 amount=19.5
//! INFO status_poll{customer=cust_1}: Polling started interval=10s
//! ```
//!
//! `RUST_LOG` overrides the configured default filter:
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin tomato-demo
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `default_filter` applies when `RUST_LOG`
/// is unset or unparsable. Calling this again is a no-op.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
