//! # Store Traits
//!
//! The collaborator seams the ranking and checkout services depend on. The
//! actor-backed clients implement them; tests can substitute their own.

use crate::geometry::Coordinate;
use crate::model::{
    CustomerId, MenuItem, Order, OrderCreate, OrderId, OrderStatus, Restaurant, RestaurantId,
};
use crate::order_actor::OrderError;
use crate::restaurant_actor::RestaurantError;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Candidate restaurants in store order. `query` is matched against name,
    /// cuisine and address; `near` may narrow the set to nearby restaurants.
    async fn search(
        &self,
        query: Option<&str>,
        near: Option<Coordinate>,
    ) -> Result<Vec<Restaurant>, RestaurantError>;

    /// The menu of one restaurant, in listed order.
    async fn menu(&self, id: RestaurantId) -> Result<Vec<MenuItem>, RestaurantError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order and returns it as stored.
    async fn create(&self, order: OrderCreate) -> Result<Order, OrderError>;

    /// Every order placed by `customer`, in store order.
    async fn list_by_customer(&self, customer: &CustomerId) -> Result<Vec<Order>, OrderError>;

    /// Moves an order to `status`. Server-side only; checkout never calls it.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError>;
}

#[async_trait]
impl<T: RestaurantStore + ?Sized> RestaurantStore for Arc<T> {
    async fn search(
        &self,
        query: Option<&str>,
        near: Option<Coordinate>,
    ) -> Result<Vec<Restaurant>, RestaurantError> {
        (**self).search(query, near).await
    }

    async fn menu(&self, id: RestaurantId) -> Result<Vec<MenuItem>, RestaurantError> {
        (**self).menu(id).await
    }
}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    async fn create(&self, order: OrderCreate) -> Result<Order, OrderError> {
        (**self).create(order).await
    }

    async fn list_by_customer(&self, customer: &CustomerId) -> Result<Vec<Order>, OrderError> {
        (**self).list_by_customer(customer).await
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        (**self).update_status(id, status).await
    }
}
