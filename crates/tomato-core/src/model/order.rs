//! A placed order: an immutable snapshot of cart lines plus a mutable status.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`crate::order_actor`] for creation rules and status transitions.
use crate::model::MenuItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// The account an order belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One cart line frozen at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: MenuItemId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl OrderLine {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Server-side delivery state. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Ordered,
    InProcess,
    Delivered,
}

impl OrderStatus {
    /// The only status this one may move to.
    pub fn next(self) -> Option<Self> {
        match self {
            OrderStatus::Ordered => Some(OrderStatus::InProcess),
            OrderStatus::InProcess => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Ordered => "ordered",
            OrderStatus::InProcess => "in-process",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("unknown order status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" => Ok(OrderStatus::Ordered),
            "in-process" | "in_process" | "inprocess" => Ok(OrderStatus::InProcess),
            "delivered" => Ok(OrderStatus::Delivered),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerId,
    pub items: Vec<OrderLine>,
    pub amount: f64,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Sum of `price × quantity` over the lines, unrounded.
pub fn lines_total(lines: &[OrderLine]) -> f64 {
    lines.iter().map(OrderLine::subtotal).sum()
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: CustomerId,
    pub items: Vec<OrderLine>,
    pub amount: f64,
    pub placed_at: DateTime<Utc>,
}

/// The only mutable part of an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_advance_one_step_at_a_time() {
        assert_eq!(OrderStatus::Ordered.next(), Some(OrderStatus::InProcess));
        assert_eq!(OrderStatus::InProcess.next(), Some(OrderStatus::Delivered));
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Ordered < OrderStatus::Delivered);
    }

    #[test]
    fn status_wire_names_round_trip() {
        let json = serde_json::to_string(&OrderStatus::InProcess).unwrap();
        assert_eq!(json, "\"in-process\"");
        for status in [
            OrderStatus::Ordered,
            OrderStatus::InProcess,
            OrderStatus::Delivered,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert_eq!(
            "Out for delivery".parse::<OrderStatus>(),
            Err(UnknownStatus("Out for delivery".into()))
        );
    }
}
