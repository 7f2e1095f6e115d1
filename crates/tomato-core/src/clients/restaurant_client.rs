//! # Restaurant Client
//!
//! High-level API over the Restaurant actor, and its [`RestaurantStore`]
//! implementation.
use super::RestaurantStore;
use crate::geometry::{distance_km, Coordinate};
use crate::model::{MenuItem, NewMenuItem, Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate};
use crate::restaurant_actor::{RestaurantAction, RestaurantActionResult, RestaurantError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Restaurant actor.
#[derive(Clone)]
pub struct RestaurantClient {
    inner: ResourceClient<Restaurant>,
    nearby_radius_km: Option<f64>,
}

impl RestaurantClient {
    /// `nearby_radius_km` is the proximity cut applied by [`RestaurantStore::search`]
    /// when a coordinate is supplied; `None` disables it.
    pub fn new(inner: ResourceClient<Restaurant>, nearby_radius_km: Option<f64>) -> Self {
        Self {
            inner,
            nearby_radius_km,
        }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_restaurant(
        &self,
        params: RestaurantCreate,
    ) -> Result<RestaurantId, RestaurantError> {
        debug!(?params, "create_restaurant called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_restaurant(
        &self,
        id: RestaurantId,
        update: RestaurantUpdate,
    ) -> Result<Restaurant, RestaurantError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Appends a menu item and returns it with its assigned id.
    #[instrument(skip(self))]
    pub async fn add_menu_item(
        &self,
        id: RestaurantId,
        item: NewMenuItem,
    ) -> Result<MenuItem, RestaurantError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, RestaurantAction::AddMenuItem(item))
            .await
            .map_err(Self::map_error)?
        {
            RestaurantActionResult::MenuItemAdded(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: RestaurantActionResult) -> RestaurantError {
    RestaurantError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[async_trait]
impl ActorClient<Restaurant> for RestaurantClient {
    type Error = RestaurantError;

    fn inner(&self) -> &ResourceClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(err) = e.entity_error::<RestaurantError>() {
            return err.clone();
        }
        match e {
            FrameworkError::NotFound(id) => RestaurantError::NotFound(id),
            other => RestaurantError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl RestaurantStore for RestaurantClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: Option<&str>,
        near: Option<Coordinate>,
    ) -> Result<Vec<Restaurant>, RestaurantError> {
        let all = self.inner.list().await.map_err(Self::map_error)?;
        let total = all.len();
        let found: Vec<Restaurant> = all
            .into_iter()
            .filter(|r| query.map_or(true, |q| r.matches_text(q)))
            .filter(|r| match (near, self.nearby_radius_km) {
                (Some(point), Some(radius)) => distance_km(&point, &r.coordinate) <= radius,
                _ => true,
            })
            .collect();
        debug!(total, found = found.len(), "Search complete");
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn menu(&self, id: RestaurantId) -> Result<Vec<MenuItem>, RestaurantError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, RestaurantAction::Menu)
            .await
            .map_err(Self::map_error)?
        {
            RestaurantActionResult::Menu(menu) => Ok(menu),
            other => Err(unexpected(other)),
        }
    }
}
