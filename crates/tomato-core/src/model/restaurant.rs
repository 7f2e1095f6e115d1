//! A restaurant listed in the store, together with its menu.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`crate::restaurant_actor`] for creation rules and the menu actions.
use crate::geometry::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;

/// Type-safe identifier for Restaurants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RestaurantId(pub u32);

impl From<u32> for RestaurantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "res_{}", self.0)
    }
}

/// Identifies a menu item across every restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MenuItemId {
    pub restaurant: RestaurantId,
    pub seq: u32,
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/item_{}", self.restaurant, self.seq)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: f64,
}

/// A menu item before the restaurant assigns it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuItem {
    pub name: String,
    pub price: f64,
}

impl NewMenuItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub price_range: String,
    pub address: String,
    pub coordinate: Coordinate,
    pub image_url: String,
    pub added_at: DateTime<Utc>,
    pub menu: Vec<MenuItem>,
}

impl Restaurant {
    /// Case-insensitive substring match over name, cuisine and address.
    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.cuisine, &self.address]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Case-insensitive substring match against the cuisine only.
    pub fn serves(&self, cuisine: &str) -> bool {
        self.cuisine
            .to_lowercase()
            .contains(&cuisine.trim().to_lowercase())
    }
}

/// Payload for creating a new restaurant.
#[derive(Debug, Clone)]
pub struct RestaurantCreate {
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub price_range: String,
    pub address: String,
    pub coordinate: Coordinate,
    pub image_url: String,
    /// Defaults to the creation instant.
    pub added_at: Option<DateTime<Utc>>,
    pub menu: Vec<NewMenuItem>,
}

/// Listing details an owner may change after creation.
#[derive(Debug, Clone, Default)]
pub struct RestaurantUpdate {
    pub rating: Option<f64>,
    pub price_range: Option<String>,
    pub image_url: Option<String>,
}

/// Display order of a menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuSort {
    #[default]
    AsListed,
    PriceLowToHigh,
    PriceHighToLow,
}

impl MenuSort {
    /// Sorts in place. Equal prices keep their listed order.
    pub fn apply(self, menu: &mut [MenuItem]) {
        let by_price = |a: &MenuItem, b: &MenuItem| {
            a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)
        };
        match self {
            MenuSort::AsListed => {}
            MenuSort::PriceLowToHigh => menu.sort_by(by_price),
            MenuSort::PriceHighToLow => menu.sort_by(|a, b| by_price(b, a)),
        }
    }
}
