//! [`ActorEntity`] implementation for [`Order`].
//!
//! Creation re-checks everything checkout already checked: the store is the
//! authority, and an order that reaches it with a wrong amount is rejected
//! rather than persisted.

use super::OrderError;
use crate::model::{
    lines_total, same_cents, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;

/// Server-side operations beyond CRUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderAction {
    /// Moves the order to its next status and returns it.
    Advance,
}

fn validate(params: &OrderCreate) -> Result<(), OrderError> {
    if params.customer.0.trim().is_empty() {
        return Err(OrderError::Validation("customer must not be empty".into()));
    }
    if params.items.is_empty() {
        return Err(OrderError::Validation("order has no items".into()));
    }
    for line in &params.items {
        if line.quantity == 0 {
            return Err(OrderError::Validation(format!(
                "{} has quantity 0",
                line.item_id
            )));
        }
        if !line.price.is_finite() || line.price < 0.0 {
            return Err(OrderError::Validation(format!(
                "{} has no valid price",
                line.item_id
            )));
        }
    }
    let expected = lines_total(&params.items);
    if !params.amount.is_finite() || !same_cents(params.amount, expected) {
        return Err(OrderError::Validation(format!(
            "amount {:.2} does not match item total {expected:.2}",
            params.amount
        )));
    }
    Ok(())
}

impl Order {
    fn advance_to(&mut self, to: OrderStatus) -> Result<(), OrderError> {
        if self.status.next() != Some(to) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderStatus;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        validate(&params)?;
        Ok(Self {
            id,
            customer: params.customer,
            items: params.items,
            amount: params.amount,
            placed_at: params.placed_at,
            status: OrderStatus::Ordered,
        })
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        self.advance_to(update.status)
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &(),
    ) -> Result<OrderStatus, Self::Error> {
        match action {
            OrderAction::Advance => {
                // Delivered has no successor; report it as a self-transition.
                let to = self.status.next().unwrap_or(self.status);
                self.advance_to(to)?;
                Ok(self.status)
            }
        }
    }
}
