use super::AppConfig;
use crate::clients::{OrderClient, RestaurantClient};
use tracing::{error, info};

/// The in-process backend: one actor per resource, each in its own task.
///
/// The clients are cheap to clone and implement the
/// [`RestaurantStore`](crate::clients::RestaurantStore) and
/// [`OrderStore`](crate::clients::OrderStore) seams the client-side services
/// are written against.
///
/// # Example
///
/// ```ignore
/// let system = DeliverySystem::new(&config);
/// let ranking = RankingService::new(system.restaurant_client.clone(), config.new_arrivals.clone());
/// let orders = OrderManager::new(system.order_client.clone(), customer);
/// // ...
/// drop((ranking, orders));
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    pub restaurant_client: RestaurantClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DeliverySystem {
    /// Spawns the restaurant and order actors. Must be called inside a Tokio
    /// runtime.
    pub fn new(config: &AppConfig) -> Self {
        let (restaurant_actor, restaurant_client) =
            crate::restaurant_actor::new(config.actor_buffer);
        let (order_actor, order_client) = crate::order_actor::new(config.actor_buffer);

        // Neither store depends on the other (Context = ()).
        let restaurant_handle = tokio::spawn(restaurant_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));

        info!(buffer = config.actor_buffer, "Delivery system started");
        Self {
            restaurant_client: RestaurantClient::new(restaurant_client, config.nearby_radius_km),
            order_client: OrderClient::new(order_client),
            handles: vec![restaurant_handle, order_handle],
        }
    }

    /// Drops this system's clients and waits for both actors to exit.
    ///
    /// Each actor stops once every clone of its client is gone, so callers
    /// must drop the clones they handed out (services, pollers) first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down delivery system...");
        drop(self.restaurant_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Delivery system shutdown complete.");
        Ok(())
    }
}
