//! Catalogue summaries for the landing and menu pages.

use super::Proximity;
use crate::location::ReferencePoint;
use crate::model::Restaurant;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The `n` highest-rated restaurants. Equal ratings keep store order.
pub fn top_rated(restaurants: &[Restaurant], n: usize) -> Vec<&Restaurant> {
    let mut sorted: Vec<&Restaurant> = restaurants.iter().collect();
    sorted.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    sorted.truncate(n);
    sorted
}

/// Distance and direction from the reference point to one restaurant, when
/// the point has coordinates.
pub fn distance_to(point: Option<&ReferencePoint>, restaurant: &Restaurant) -> Option<Proximity> {
    let origin = point?.coordinate()?;
    Some(Proximity::between(&origin, &restaurant.coordinate))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantStats {
    pub total: usize,
    /// `None` for an empty catalogue.
    pub average_rating: Option<f64>,
    pub by_cuisine: BTreeMap<String, usize>,
    /// Highest count; ties go to the alphabetically first cuisine.
    pub most_popular_cuisine: Option<String>,
}

impl RestaurantStats {
    pub fn from_restaurants(restaurants: &[Restaurant]) -> Self {
        let total = restaurants.len();
        let average_rating = (total > 0)
            .then(|| restaurants.iter().map(|r| r.rating).sum::<f64>() / total as f64);

        let mut by_cuisine = BTreeMap::new();
        for r in restaurants {
            *by_cuisine.entry(r.cuisine.clone()).or_insert(0) += 1;
        }

        // BTreeMap iterates alphabetically, so a strict `>` keeps the first on ties.
        let mut leader: Option<(&String, usize)> = None;
        for (cuisine, &count) in &by_cuisine {
            if leader.map_or(true, |(_, best)| count > best) {
                leader = Some((cuisine, count));
            }
        }
        let most_popular_cuisine = leader.map(|(c, _)| c.clone());

        Self {
            total,
            average_rating,
            by_cuisine,
            most_popular_cuisine,
        }
    }
}
