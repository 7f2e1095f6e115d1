//! # Filter Pipeline
//!
//! The pure part of ranking: dedupe, annotate, radius cut, category filter,
//! sort. The stage order is fixed because the radius cut and the sort read
//! the distance the annotation stage writes.

use super::RankingError;
use crate::geometry::{bearing_octant, distance_km, Coordinate, Octant};
use crate::model::Restaurant;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

/// Minimum rating kept by [`CategoryFilter::Popular`].
pub const POPULAR_MIN_RATING: f64 = 4.5;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Rating of at least [`POPULAR_MIN_RATING`].
    Popular,
    /// Whatever the configured [`RecencyPolicy`] selects.
    New,
    /// Case-insensitive substring of the cuisine.
    Cuisine(String),
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    /// `all`, `popular` and `new` are keywords; anything else is a cuisine.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "" | "all" => CategoryFilter::All,
            "popular" => CategoryFilter::Popular,
            "new" => CategoryFilter::New,
            _ => CategoryFilter::Cuisine(trimmed.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Radius {
    #[default]
    All,
    WithinKm(f64),
}

/// How the `new` category picks its restaurants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecencyPolicy {
    /// The `n` most recently added candidates.
    NewestN(usize),
    /// Candidates whose rendered id starts with the prefix.
    IdPrefix(String),
}

impl Default for RecencyPolicy {
    fn default() -> Self {
        RecencyPolicy::NewestN(4)
    }
}

/// One search as the user phrased it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub category: CategoryFilter,
    pub radius: Radius,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Radius is checked by [`SearchRequest::validate`], which
    /// [`rank_candidates`] runs first.
    pub fn within_km(mut self, km: f64) -> Self {
        self.radius = Radius::WithinKm(km);
        self
    }

    /// A radius must be a positive, finite number of kilometres.
    pub fn validate(&self) -> Result<(), RankingError> {
        match self.radius {
            Radius::WithinKm(km) if !(km.is_finite() && km > 0.0) => {
                Err(RankingError::InvalidRadius(km))
            }
            _ => Ok(()),
        }
    }
}

/// Distance and direction from the reference point. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    pub distance_km: f64,
    pub direction: Octant,
}

impl Proximity {
    pub fn between(origin: &Coordinate, target: &Coordinate) -> Self {
        Self {
            distance_km: distance_km(origin, target),
            direction: bearing_octant(origin, target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    #[serde(flatten)]
    pub proximity: Option<Proximity>,
}

impl RankedRestaurant {
    pub fn distance_km(&self) -> Option<f64> {
        self.proximity.map(|p| p.distance_km)
    }
}

/// Runs the pipeline over `candidates` in store order. Fails only when the
/// request does not [validate](SearchRequest::validate).
pub fn rank_candidates(
    candidates: Vec<Restaurant>,
    origin: Option<&Coordinate>,
    request: &SearchRequest,
    recency: &RecencyPolicy,
) -> Result<Vec<RankedRestaurant>, RankingError> {
    request.validate()?;
    let mut seen = HashSet::new();
    let annotated = candidates
        .into_iter()
        .filter(|r| seen.insert(r.id))
        .map(|restaurant| RankedRestaurant {
            proximity: origin.map(|o| Proximity::between(o, &restaurant.coordinate)),
            restaurant,
        });

    let within: Vec<RankedRestaurant> = match request.radius {
        // Without a reference point there is no distance and nothing to cut.
        Radius::WithinKm(km) => annotated
            .filter(|r| r.distance_km().map_or(true, |d| d <= km))
            .collect(),
        Radius::All => annotated.collect(),
    };

    let mut ranked = apply_category(within, &request.category, recency);

    if origin.is_some() {
        ranked.sort_by(|a, b| {
            a.distance_km()
                .partial_cmp(&b.distance_km())
                .unwrap_or(Ordering::Equal)
        });
    }
    Ok(ranked)
}

fn apply_category(
    restaurants: Vec<RankedRestaurant>,
    category: &CategoryFilter,
    recency: &RecencyPolicy,
) -> Vec<RankedRestaurant> {
    match category {
        CategoryFilter::All => restaurants,
        CategoryFilter::Popular => restaurants
            .into_iter()
            .filter(|r| r.restaurant.rating >= POPULAR_MIN_RATING)
            .collect(),
        CategoryFilter::Cuisine(cuisine) => restaurants
            .into_iter()
            .filter(|r| r.restaurant.serves(cuisine))
            .collect(),
        CategoryFilter::New => match recency {
            RecencyPolicy::IdPrefix(prefix) => restaurants
                .into_iter()
                .filter(|r| r.restaurant.id.to_string().starts_with(prefix.as_str()))
                .collect(),
            RecencyPolicy::NewestN(n) => newest(restaurants, *n),
        },
    }
}

/// Keeps the `n` latest `added_at` values, in their original order. Among
/// equal timestamps the later store position counts as newer.
fn newest(restaurants: Vec<RankedRestaurant>, n: usize) -> Vec<RankedRestaurant> {
    let mut by_age: Vec<usize> = (0..restaurants.len()).collect();
    by_age.sort_by(|&a, &b| {
        let (ta, tb) = (restaurants[a].restaurant.added_at, restaurants[b].restaurant.added_at);
        tb.cmp(&ta).then(b.cmp(&a))
    });
    let keep: HashSet<usize> = by_age.into_iter().take(n).collect();
    restaurants
        .into_iter()
        .enumerate()
        .filter(|(i, _)| keep.contains(i))
        .map(|(_, r)| r)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RestaurantId;
    use chrono::{Duration, TimeZone, Utc};

    fn hisar() -> Coordinate {
        Coordinate::new(29.1492, 75.7217).unwrap()
    }

    // ~1 km per 0.009° of latitude
    fn restaurant_at_km(id: u32, km: f64) -> Restaurant {
        restaurant(id, &format!("r{id}"), "Punjabi", 4.0, 29.1492 + km / 111.2)
    }

    fn restaurant(id: u32, name: &str, cuisine: &str, rating: f64, lat: f64) -> Restaurant {
        Restaurant {
            id: RestaurantId(id),
            name: name.into(),
            cuisine: cuisine.into(),
            rating,
            price_range: "$".into(),
            address: "Hisar".into(),
            coordinate: Coordinate::new(lat, 75.7217).unwrap(),
            image_url: String::new(),
            added_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(id.into()),
            menu: vec![],
        }
    }

    fn ids(ranked: &[RankedRestaurant]) -> Vec<u32> {
        ranked.iter().map(|r| r.restaurant.id.0).collect()
    }

    #[test]
    fn radius_then_sort_by_distance() {
        let candidates = vec![
            restaurant_at_km(1, 3.0),
            restaurant_at_km(2, 7.0),
            restaurant_at_km(3, 1.0),
        ];
        let request = SearchRequest::new().within_km(5.0);
        let ranked =
            rank_candidates(candidates, Some(&hisar()), &request, &RecencyPolicy::default()).unwrap();
        assert_eq!(ids(&ranked), [3, 1]);
        assert!(ranked.iter().all(|r| r.distance_km().unwrap() <= 5.0));
        assert_eq!(ranked[0].proximity.unwrap().direction, Octant::N);
    }

    #[test]
    fn no_point_and_no_filter_is_the_identity() {
        let candidates = vec![
            restaurant_at_km(5, 9.0),
            restaurant_at_km(2, 1.0),
            restaurant_at_km(7, 4.0),
        ];
        let ranked = rank_candidates(
            candidates.clone(),
            None,
            &SearchRequest::new(),
            &RecencyPolicy::default(),
        )
        .unwrap();
        let back: Vec<Restaurant> = ranked.iter().map(|r| r.restaurant.clone()).collect();
        assert_eq!(back, candidates);
        assert!(ranked.iter().all(|r| r.proximity.is_none()));
    }

    #[test]
    fn radius_without_a_point_is_a_no_op() {
        let candidates = vec![restaurant_at_km(1, 50.0), restaurant_at_km(2, 1.0)];
        let ranked = rank_candidates(
            candidates,
            None,
            &SearchRequest::new().within_km(5.0),
            &RecencyPolicy::default(),
        )
        .unwrap();
        assert_eq!(ids(&ranked), [1, 2]);
    }

    #[test]
    fn duplicates_keep_their_first_occurrence() {
        let candidates = vec![
            restaurant_at_km(1, 2.0),
            restaurant_at_km(2, 1.0),
            restaurant_at_km(1, 2.0),
        ];
        let ranked =
            rank_candidates(candidates, None, &SearchRequest::new(), &RecencyPolicy::default())
                .unwrap();
        assert_eq!(ids(&ranked), [1, 2]);
    }

    #[test]
    fn popular_keeps_ratings_from_four_and_a_half() {
        let candidates = vec![
            restaurant(1, "a", "Thai", 4.4, 29.0),
            restaurant(2, "b", "Thai", 4.5, 29.0),
            restaurant(3, "c", "Thai", 4.9, 29.0),
        ];
        let request = SearchRequest::new().category(CategoryFilter::Popular);
        let ranked = rank_candidates(candidates, None, &request, &RecencyPolicy::default()).unwrap();
        assert_eq!(ids(&ranked), [2, 3]);
    }

    #[test]
    fn cuisine_filter_is_a_case_insensitive_substring() {
        let candidates = vec![
            restaurant(1, "a", "South Indian", 4.0, 29.0),
            restaurant(2, "b", "Italian", 4.0, 29.0),
            restaurant(3, "c", "North Indian", 4.0, 29.0),
        ];
        let request = SearchRequest::new().category("indian".parse().unwrap());
        let ranked = rank_candidates(candidates, None, &request, &RecencyPolicy::default()).unwrap();
        assert_eq!(ids(&ranked), [1, 3]);
    }

    #[test]
    fn newest_policy_keeps_latest_additions_in_store_order() {
        // added_at grows with id
        let candidates = vec![
            restaurant(4, "d", "Thai", 4.0, 29.0),
            restaurant(1, "a", "Thai", 4.0, 29.0),
            restaurant(6, "f", "Thai", 4.0, 29.0),
            restaurant(2, "b", "Thai", 4.0, 29.0),
        ];
        let request = SearchRequest::new().category(CategoryFilter::New);
        let ranked = rank_candidates(candidates, None, &request, &RecencyPolicy::NewestN(2)).unwrap();
        assert_eq!(ids(&ranked), [4, 6]);
    }

    #[test]
    fn prefix_policy_matches_rendered_ids() {
        let candidates = vec![
            restaurant(1, "a", "Thai", 4.0, 29.0),
            restaurant(12, "b", "Thai", 4.0, 29.0),
            restaurant(2, "c", "Thai", 4.0, 29.0),
        ];
        let request = SearchRequest::new().category(CategoryFilter::New);
        let policy = RecencyPolicy::IdPrefix("res_1".into());
        let ranked = rank_candidates(candidates, None, &request, &policy).unwrap();
        assert_eq!(ids(&ranked), [1, 12]);
    }

    #[test]
    fn invalid_radius_is_rejected_by_the_pipeline() {
        for km in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = rank_candidates(
                vec![restaurant_at_km(1, 2.0)],
                Some(&hisar()),
                &SearchRequest::new().within_km(km),
                &RecencyPolicy::default(),
            );
            assert!(matches!(result, Err(RankingError::InvalidRadius(_))), "{km}");
        }
        assert!(SearchRequest::new().within_km(0.5).validate().is_ok());
        assert!(SearchRequest::new().validate().is_ok());
    }

    #[test]
    fn category_keywords_parse() {
        assert_eq!("ALL".parse(), Ok(CategoryFilter::All));
        assert_eq!(" popular ".parse(), Ok(CategoryFilter::Popular));
        assert_eq!("new".parse(), Ok(CategoryFilter::New));
        assert_eq!(
            "Chinese".parse(),
            Ok(CategoryFilter::Cuisine("Chinese".into()))
        );
    }

    #[test]
    fn ranked_restaurant_serializes_flat() {
        let ranked = rank_candidates(
            vec![restaurant_at_km(1, 2.0)],
            Some(&hisar()),
            &SearchRequest::new(),
            &RecencyPolicy::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["name"], "r1");
        assert_eq!(json["direction"], "N");
        assert!(json["distance_km"].as_f64().unwrap() > 1.9);
    }
}
