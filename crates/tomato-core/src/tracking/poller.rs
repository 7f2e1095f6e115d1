//! # Status Poller
//!
//! A background task that re-fetches a customer's orders on a fixed interval
//! and publishes the merged [`OrderBoard`] on a `watch` channel. The task is
//! owned by the [`StatusPoller`] handle: stopping or dropping the handle
//! aborts it, so no timer outlives the view that started it.

use super::{merge_snapshot, OrderBoard};
use crate::clients::OrderStore;
use crate::model::CustomerId;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn, Instrument};

/// Shortest interval the poller runs at; shorter requests, zero included, are
/// raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

pub struct StatusPoller {
    board: watch::Receiver<OrderBoard>,
    handle: JoinHandle<()>,
}

impl StatusPoller {
    /// Spawns the polling task. The first fetch happens immediately.
    pub fn spawn<S>(store: S, customer: CustomerId, interval: Duration) -> Self
    where
        S: OrderStore + 'static,
    {
        if interval < MIN_POLL_INTERVAL {
            warn!(?interval, min = ?MIN_POLL_INTERVAL, "Poll interval too short, clamping");
        }
        let interval = interval.max(MIN_POLL_INTERVAL);
        let (tx, board) = watch::channel(OrderBoard::default());
        let span = tracing::info_span!("status_poll", customer = %customer);

        let handle = tokio::spawn(
            async move {
                info!(?interval, "Polling started");
                let mut ticker = tokio::time::interval(interval);
                // A slow fetch delays the next tick instead of queueing a burst.
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

                loop {
                    ticker.tick().await;
                    let fetched = store.list_by_customer(&customer).await;
                    let previous = tx.borrow().clone();
                    let next = match fetched {
                        Ok(fresh) => {
                            debug!(count = fresh.len(), "Fetched orders");
                            merge_snapshot(&previous, fresh)
                        }
                        Err(e) => {
                            warn!(error = %e, "Status poll failed, keeping previous board");
                            OrderBoard {
                                last_error: Some(e.to_string()),
                                ..previous
                            }
                        }
                    };
                    if tx.send(next).is_err() {
                        break;
                    }
                }
                info!("Polling stopped");
            }
            .instrument(span),
        );

        Self { board, handle }
    }

    /// The latest published board.
    pub fn board(&self) -> OrderBoard {
        self.board.borrow().clone()
    }

    /// Another receiver for the same boards.
    pub fn subscribe(&self) -> watch::Receiver<OrderBoard> {
        self.board.clone()
    }

    /// Waits for the next published board. `None` once polling has stopped.
    pub async fn changed(&mut self) -> Option<OrderBoard> {
        self.board.changed().await.ok()?;
        Some(self.board.borrow_and_update().clone())
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops polling and waits for the task to exit.
    pub async fn stop(mut self) {
        self.handle.abort();
        // Cancelled is the expected outcome here.
        let _ = (&mut self.handle).await;
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
    use crate::order_actor::OrderError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Serves scripted fetches in order, repeating the last one.
    struct ScriptedStore {
        fetches: Mutex<Vec<Result<Vec<Order>, OrderError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedStore {
        fn new(fetches: Vec<Result<Vec<Order>, OrderError>>) -> Arc<Self> {
            Arc::new(Self {
                fetches: Mutex::new(fetches),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl OrderStore for ScriptedStore {
        async fn create(&self, _order: OrderCreate) -> Result<Order, OrderError> {
            unimplemented!("not used by the poller")
        }

        async fn list_by_customer(&self, _customer: &CustomerId) -> Result<Vec<Order>, OrderError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let fetches = self.fetches.lock().unwrap();
            fetches[n.min(fetches.len() - 1)].clone()
        }

        async fn update_status(&self, _id: OrderId, _s: OrderStatus) -> Result<Order, OrderError> {
            unimplemented!("not used by the poller")
        }
    }

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId(1),
            customer: CustomerId::new("cust_1"),
            items: vec![],
            amount: 4.0,
            placed_at: Utc::now(),
            status,
        }
    }

    #[tokio::test]
    async fn status_never_moves_backward_between_polls() {
        let store = ScriptedStore::new(vec![
            Ok(vec![order(OrderStatus::InProcess)]),
            Ok(vec![order(OrderStatus::Ordered)]),
            Ok(vec![order(OrderStatus::Delivered)]),
        ]);
        let mut poller =
            StatusPoller::spawn(store, CustomerId::new("cust_1"), Duration::from_millis(5));

        // A slow receiver may skip boards, but never sees a regression.
        let mut seen = Vec::new();
        while seen.last() != Some(&OrderStatus::Delivered) {
            let board = poller.changed().await.unwrap();
            seen.push(board.orders[0].status);
        }
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{seen:?}");
        assert!(!seen.contains(&OrderStatus::Ordered));
        poller.stop().await;
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_orders() {
        let store = ScriptedStore::new(vec![
            Ok(vec![order(OrderStatus::Ordered)]),
            Err(OrderError::ActorCommunicationError("offline".into())),
        ]);
        let mut poller =
            StatusPoller::spawn(store, CustomerId::new("cust_1"), Duration::from_millis(5));

        let failed = loop {
            let board = poller.changed().await.unwrap();
            if board.last_error.is_some() {
                break board;
            }
        };
        assert_eq!(failed.orders.len(), 1);
        assert_eq!(failed.orders[0].status, OrderStatus::Ordered);
        assert!(failed.refreshed_at.is_some());
        assert!(failed.last_error.unwrap().contains("offline"));
    }

    #[tokio::test]
    async fn zero_interval_is_clamped_and_keeps_polling() {
        let store = ScriptedStore::new(vec![Ok(vec![order(OrderStatus::Ordered)])]);
        let mut poller =
            StatusPoller::spawn(store.clone(), CustomerId::new("cust_1"), Duration::ZERO);

        let board = poller.changed().await.expect("first board");
        assert_eq!(board.orders[0].status, OrderStatus::Ordered);
        assert!(poller.changed().await.is_some());
        assert!(poller.is_running());
        assert!(store.calls.load(Ordering::SeqCst) >= 2);
        poller.stop().await;
    }

    #[tokio::test]
    async fn stopping_ends_the_stream() {
        let store = ScriptedStore::new(vec![Ok(vec![])]);
        let poller =
            StatusPoller::spawn(store.clone(), CustomerId::new("cust_1"), Duration::from_millis(5));
        let mut boards = poller.subscribe();
        assert!(poller.is_running());

        poller.stop().await;
        // Drain whatever was published before the abort.
        while boards.changed().await.is_ok() {}

        let calls = store.calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(store.calls.load(Ordering::SeqCst), calls);
    }
}
