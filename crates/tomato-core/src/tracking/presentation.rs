//! How an order status is shown on the order history page.

use crate::model::OrderStatus;
use serde::Serialize;

/// What the user can do next with an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Affordance {
    TrackOrder,
    Reorder,
    ContactSupport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPresentation {
    pub label: &'static str,
    pub icon: &'static str,
    pub affordance: Affordance,
}

/// Shown for any status string this client does not recognise.
pub const UNKNOWN_STATUS: StatusPresentation = StatusPresentation {
    label: "Status unavailable",
    icon: "help-circle",
    affordance: Affordance::ContactSupport,
};

pub fn present(status: OrderStatus) -> StatusPresentation {
    match status {
        OrderStatus::Ordered => StatusPresentation {
            label: "Order placed",
            icon: "receipt",
            affordance: Affordance::TrackOrder,
        },
        OrderStatus::InProcess => StatusPresentation {
            label: "Being prepared",
            icon: "chef-hat",
            affordance: Affordance::TrackOrder,
        },
        OrderStatus::Delivered => StatusPresentation {
            label: "Delivered",
            icon: "check-circle",
            affordance: Affordance::Reorder,
        },
    }
}

/// Like [`present`], for a status string straight off the wire.
pub fn present_raw(raw: &str) -> StatusPresentation {
    raw.parse().map(present).unwrap_or(UNKNOWN_STATUS)
}
