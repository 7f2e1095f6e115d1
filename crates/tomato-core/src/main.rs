//! # Tomato Demo
//!
//! Walks one customer through the whole client flow against the in-process
//! stores:
//! 1. Seeding restaurants around Hisar.
//! 2. Resolving a reference point (device first, then a map pick).
//! 3. Ranking nearby restaurants and loading a menu.
//! 4. Filling the cart, paying through [`SimulatedGateway`] and checking out.
//! 5. Advancing the order server-side and watching it through the poller.
//!
//! Settings come from `TOMATO_*` variables; see [`tomato_core::lifecycle::AppConfig`].

use chrono::{Duration as ChronoDuration, Utc};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tomato_core::cart::Cart;
use tomato_core::clients::RestaurantClient;
use tomato_core::geometry::Coordinate;
use tomato_core::lifecycle::{load_app_config, setup_tracing, DeliverySystem};
use tomato_core::location::{LocationController, NoGeolocation};
use tomato_core::model::{CustomerId, MenuSort, NewMenuItem, RestaurantCreate};
use tomato_core::payment::{PaymentDetails, PaymentGateway, SimulatedGateway};
use tomato_core::ranking::{
    top_rated, Completion, RankingService, RestaurantStats, SearchRequest, SearchSession,
};
use tomato_core::storage::{FileStorage, Storage};
use tomato_core::tracking::{present, OrderManager};
use tracing::{info, warn, Instrument};

const HISAR: (f64, f64) = (29.1492, 75.7217);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = load_app_config()?;
    setup_tracing(&config.log_filter);

    info!(storage = %config.storage_dir.display(), "Starting tomato demo");
    let system = DeliverySystem::new(&config);

    seed(&system.restaurant_client)
        .instrument(tracing::info_span!("seeding"))
        .await?;

    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&config.storage_dir)?);

    // Reference point: this host has no location service, so fall back to a map pick.
    let mut location = LocationController::restore(
        storage.clone(),
        Arc::new(NoGeolocation),
        config.geolocation_timeout,
    )?;
    if let Err(e) = location.acquire_from_device().await {
        warn!(error = %e, "Device location unavailable, picking on the map");
        location.arm_map_pick();
        location.handle_map_click(HISAR.0, HISAR.1)?;
    }

    // Discovery
    let ranking = RankingService::new(system.restaurant_client.clone(), config.new_arrivals.clone());
    let mut session = SearchSession::new();
    let ticket = session.begin();
    let outcome = ranking
        .rank(location.active(), &SearchRequest::new().within_km(5.0))
        .await;
    if let Completion::Failed(e) = session.complete(ticket, outcome) {
        return Err(e.into());
    }
    let nearby = session.results().unwrap_or_default();
    for r in nearby {
        info!(
            name = %r.restaurant.name,
            distance_km = r.distance_km().unwrap_or_default(),
            direction = ?r.proximity.map(|p| p.direction),
            "Nearby"
        );
    }

    let catalogue: Vec<_> = nearby.iter().map(|r| r.restaurant.clone()).collect();
    let stats = RestaurantStats::from_restaurants(&catalogue);
    info!(
        total = stats.total,
        popular_cuisine = ?stats.most_popular_cuisine,
        best = ?top_rated(&catalogue, 1).first().map(|r| &r.name),
        "Catalogue summary"
    );

    let Some(closest) = nearby.first() else {
        warn!("No restaurants within 5 km");
        drop(ranking);
        return Ok(system.shutdown().await?);
    };
    let menu = ranking
        .menu(closest.restaurant.id, MenuSort::PriceLowToHigh)
        .await?;

    // Cart and payment
    let mut cart = Cart::load(storage.clone())?;
    for item in menu.iter().take(2) {
        cart.add(item)?;
    }
    if let Some(cheapest) = menu.first() {
        cart.increase(cheapest.id)?;
    }
    info!(items = cart.item_count(), total = cart.total(), "Cart ready");

    let gateway = SimulatedGateway::default();
    let secret = gateway.create_intent(cart.total()).await?;
    let confirmation = gateway
        .confirm(
            &secret,
            &PaymentDetails {
                card_token: "tok_visa".into(),
            },
        )
        .await?;

    let orders = OrderManager::new(system.order_client.clone(), CustomerId::new("cust_demo"));
    let order = orders
        .checkout(&mut cart, &confirmation)
        .instrument(tracing::info_span!("checkout", customer = %orders.customer()))
        .await?;

    // Tracking. A short interval keeps the demo quick.
    let mut poller = orders.poll_status(config.poll_interval.min(Duration::from_secs(1)));
    let mut last_seen = None;
    while let Some(board) = poller.changed().await {
        let Some(current) = board.get(order.id) else {
            continue;
        };
        if last_seen == Some(current.status) {
            continue;
        }
        last_seen = Some(current.status);
        let shown = present(current.status);
        info!(order_id = %order.id, status = %current.status, label = shown.label, "Order update");
        if current.status.is_terminal() {
            break;
        }
        // Stand-in for the kitchen and the rider.
        system.order_client.advance(order.id).await?;
    }
    poller.stop().await;

    info!(history = orders.list_orders().await?.len(), "Orders on file");

    drop((ranking, orders));
    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}

async fn seed(client: &RestaurantClient) -> Result<(), Box<dyn Error>> {
    let now = Utc::now();
    let spots = [
        ("Spice Route", "North Indian", 4.6, 0.012, 0.004, 30),
        ("Dragon Bowl", "Chinese", 4.2, -0.020, 0.011, 12),
        ("Crust & Co", "Italian", 4.7, 0.005, -0.018, 3),
        ("Haveli Sweets", "Desserts", 4.4, -0.006, -0.007, 1),
        ("Highway Dhaba", "North Indian", 3.9, 0.150, 0.090, 60),
    ];

    for (name, cuisine, rating, dlat, dlon, days_ago) in spots {
        let id = client
            .create_restaurant(RestaurantCreate {
                name: name.into(),
                cuisine: cuisine.into(),
                rating,
                price_range: "$$".into(),
                address: format!("{name}, Hisar"),
                coordinate: Coordinate::new(HISAR.0 + dlat, HISAR.1 + dlon)?,
                image_url: String::new(),
                added_at: Some(now - ChronoDuration::days(days_ago)),
                menu: vec![
                    NewMenuItem::new("House Special", 9.5),
                    NewMenuItem::new("Starter Platter", 6.25),
                    NewMenuItem::new("Masala Chai", 1.5),
                ],
            })
            .await?;
        info!(restaurant_id = %id, name, "Seeded");
    }
    Ok(())
}
