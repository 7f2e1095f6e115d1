//! # Checkout
//!
//! Converts the live cart and a payment confirmation into a persisted order.
//! The cart is cleared only after the order store has accepted the order;
//! every failure leaves it as it was so the user can retry.

use super::{sort_newest_first, StatusPoller};
use crate::cart::Cart;
use crate::clients::OrderStore;
use crate::model::{round_to_cents, to_cents, CustomerId, MenuItemId, Order, OrderCreate, OrderLine};
use crate::order_actor::OrderError;
use crate::payment::{PaymentConfirmation, PaymentOutcome};
use chrono::Utc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Malformed checkout input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("{0} has no valid price")]
    MissingPrice(MenuItemId),
    #[error("{0} has quantity 0")]
    ZeroQuantity(MenuItemId),
    #[error("paid {paid_cents} cents but the cart totals {expected_cents}")]
    AmountMismatch { expected_cents: i64, paid_cents: i64 },
    #[error("order store rejected the order: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("invalid checkout: {0}")]
    Validation(#[from] ValidationError),
    #[error("payment not confirmed: {0}")]
    PaymentNotConfirmed(String),
    #[error("could not save order: {0}")]
    Persistence(OrderError),
}

impl From<OrderError> for CheckoutError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Validation(reason) => ValidationError::Rejected(reason).into(),
            other => CheckoutError::Persistence(other),
        }
    }
}

/// Client-side order operations for one customer.
pub struct OrderManager<S> {
    store: S,
    customer: CustomerId,
}

impl<S: OrderStore> OrderManager<S> {
    pub fn new(store: S, customer: CustomerId) -> Self {
        Self { store, customer }
    }

    pub fn customer(&self) -> &CustomerId {
        &self.customer
    }

    /// Places the cart as an order and clears the cart.
    #[instrument(skip(self, cart, payment), fields(customer = %self.customer))]
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        payment: &PaymentConfirmation,
    ) -> Result<Order, CheckoutError> {
        let items = snapshot(cart)?;
        let amount = round_to_cents(cart.total());

        if let PaymentOutcome::Failed { reason } = &payment.outcome {
            warn!(%reason, "Checkout with failed payment");
            return Err(CheckoutError::PaymentNotConfirmed(reason.clone()));
        }
        if payment.amount_cents != to_cents(amount) {
            return Err(ValidationError::AmountMismatch {
                expected_cents: to_cents(amount),
                paid_cents: payment.amount_cents,
            }
            .into());
        }

        let order = self
            .store
            .create(OrderCreate {
                customer: self.customer.clone(),
                items,
                amount,
                placed_at: Utc::now(),
            })
            .await?;

        // The order exists now; a failed clear must not turn into a retry.
        if let Err(e) = cart.clear() {
            warn!(order_id = %order.id, error = %e, "Order placed but cart could not be cleared");
        }
        info!(order_id = %order.id, amount, "Order placed");
        Ok(order)
    }

    /// The customer's orders, newest first.
    #[instrument(skip(self), fields(customer = %self.customer))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.store.list_by_customer(&self.customer).await?;
        sort_newest_first(&mut orders);
        Ok(orders)
    }
}

impl<S: OrderStore + Clone + 'static> OrderManager<S> {
    /// Starts refreshing the customer's orders every `interval`, clamped to
    /// [`MIN_POLL_INTERVAL`](super::MIN_POLL_INTERVAL). Polling stops when the
    /// returned handle is stopped or dropped.
    pub fn poll_status(&self, interval: Duration) -> StatusPoller {
        StatusPoller::spawn(self.store.clone(), self.customer.clone(), interval)
    }
}

fn snapshot(cart: &Cart) -> Result<Vec<OrderLine>, ValidationError> {
    if cart.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    cart.lines()
        .iter()
        .map(|line| {
            if !line.item.price.is_finite() || line.item.price < 0.0 {
                return Err(ValidationError::MissingPrice(line.item.id));
            }
            if line.quantity == 0 {
                return Err(ValidationError::ZeroQuantity(line.item.id));
            }
            Ok(OrderLine {
                item_id: line.item.id,
                name: line.item.name.clone(),
                price: line.item.price,
                quantity: line.quantity,
            })
        })
        .collect()
}
