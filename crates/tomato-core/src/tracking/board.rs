//! The rendered order list and how a fresh fetch is folded into it.

use crate::model::{Order, OrderId};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBoard {
    /// Newest first.
    pub orders: Vec<Order>,
    /// Last successful fetch.
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Set when the latest fetch failed; `orders` are then from an earlier one.
    pub last_error: Option<String>,
}

impl OrderBoard {
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }
}

/// Orders newest first by placement time, then by id.
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by_key(|o| Reverse((o.placed_at, o.id)));
}

/// Folds a fresh fetch into the previous board.
///
/// Per order id the status never moves backward, even if the fetch returned
/// an older view. An order already shown as terminal stays on the board when
/// the fetch omits it. Other orders follow the fetch.
pub fn merge_snapshot(previous: &OrderBoard, fresh: Vec<Order>) -> OrderBoard {
    let seen: HashMap<OrderId, &Order> = previous.orders.iter().map(|o| (o.id, o)).collect();
    let fetched: HashSet<OrderId> = fresh.iter().map(|o| o.id).collect();

    let mut orders: Vec<Order> = fresh
        .into_iter()
        .map(|mut order| {
            if let Some(old) = seen.get(&order.id) {
                order.status = order.status.max(old.status);
            }
            order
        })
        .collect();

    orders.extend(
        previous
            .orders
            .iter()
            .filter(|o| o.status.is_terminal() && !fetched.contains(&o.id))
            .cloned(),
    );
    sort_newest_first(&mut orders);

    OrderBoard {
        orders,
        refreshed_at: Some(Utc::now()),
        last_error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, OrderStatus};
    use chrono::{Duration, TimeZone};

    fn order(id: u32, minutes: i64, status: OrderStatus) -> Order {
        Order {
            id: OrderId(id),
            customer: CustomerId::new("cust_1"),
            items: vec![],
            amount: 1.0,
            placed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
                + Duration::minutes(minutes),
            status,
        }
    }

    fn board(orders: Vec<Order>) -> OrderBoard {
        OrderBoard {
            orders,
            ..OrderBoard::default()
        }
    }

    fn statuses(board: &OrderBoard) -> Vec<(u32, OrderStatus)> {
        board.orders.iter().map(|o| (o.id.0, o.status)).collect()
    }

    #[test]
    fn stale_fetch_cannot_move_a_status_backward() {
        let previous = board(vec![order(1, 0, OrderStatus::InProcess)]);
        let merged = merge_snapshot(&previous, vec![order(1, 0, OrderStatus::Ordered)]);
        assert_eq!(statuses(&merged), [(1, OrderStatus::InProcess)]);

        let merged = merge_snapshot(&merged, vec![order(1, 0, OrderStatus::Delivered)]);
        assert_eq!(statuses(&merged), [(1, OrderStatus::Delivered)]);
    }

    #[test]
    fn delivered_orders_survive_a_fetch_that_omits_them() {
        let previous = board(vec![
            order(2, 10, OrderStatus::Ordered),
            order(1, 0, OrderStatus::Delivered),
        ]);
        let merged = merge_snapshot(&previous, vec![order(3, 20, OrderStatus::Ordered)]);
        assert_eq!(
            statuses(&merged),
            [(3, OrderStatus::Ordered), (1, OrderStatus::Delivered)]
        );
    }

    #[test]
    fn merged_board_is_newest_first() {
        let merged = merge_snapshot(
            &OrderBoard::default(),
            vec![
                order(1, 0, OrderStatus::Ordered),
                order(3, 30, OrderStatus::Ordered),
                order(2, 30, OrderStatus::Ordered),
            ],
        );
        let ids: Vec<u32> = merged.orders.iter().map(|o| o.id.0).collect();
        assert_eq!(ids, [3, 2, 1]);
        assert!(merged.refreshed_at.is_some());
        assert!(merged.last_error.is_none());
    }
}
