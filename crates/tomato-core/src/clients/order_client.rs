use super::OrderStore;
use crate::model::{CustomerId, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Amount and item validation happens in the Order entity's
/// `from_create_params`; this wrapper only translates errors.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Moves an order to its next status, as the kitchen or rider would.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Advance)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(err) = e.entity_error::<OrderError>() {
            return err.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    #[instrument(skip(self, order), fields(customer = %order.customer))]
    async fn create(&self, order: OrderCreate) -> Result<Order, OrderError> {
        debug!(?order, "create_order called");
        info!("Sending create_order to actor");
        let id = self.inner.create(order).await.map_err(Self::map_error)?;
        self.inner
            .get(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn list_by_customer(&self, customer: &CustomerId) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let orders = self.inner.list().await.map_err(Self::map_error)?;
        Ok(orders
            .into_iter()
            .filter(|order| &order.customer == customer)
            .collect())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderUpdate { status })
            .await
            .map_err(Self::map_error)
    }
}
