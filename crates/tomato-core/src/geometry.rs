//! # Geometry
//!
//! Great-circle distance and coarse compass bearing between two coordinates.
//! Both functions are pure and total over [`Coordinate`], which can only be
//! built from in-range values.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use thiserror::Error;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Rejected coordinate input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A validated WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

// Persisted values are re-validated on the way in.
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Builds a coordinate, rejecting NaN and out-of-range components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// One of the eight 45° compass sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Octant {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Octant {
    /// Clockwise from north.
    pub const ALL: [Octant; 8] = [
        Octant::N,
        Octant::NE,
        Octant::E,
        Octant::SE,
        Octant::S,
        Octant::SW,
        Octant::W,
        Octant::NW,
    ];

    /// Octant whose centre is nearest to `degrees`.
    ///
    /// A bearing exactly on a sector boundary (22.5°, 67.5°, ...) goes to the
    /// clockwise neighbour: 22.5° is NE, 337.5° is N.
    pub fn from_bearing(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let index = (normalized / 45.0).round() as usize % 8;
        Self::ALL[index]
    }

    /// The octant pointing the other way.
    pub fn opposite(self) -> Self {
        let index = Self::ALL.iter().position(|o| *o == self).unwrap_or(0);
        Self::ALL[(index + 4) % 8]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Octant::N => "N",
            Octant::NE => "NE",
            Octant::E => "E",
            Octant::SE => "SE",
            Octant::S => "S",
            Octant::SW => "SW",
            Octant::W => "W",
            Octant::NW => "NW",
        }
    }
}

impl Display for Octant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Haversine distance in kilometres.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing from `a` towards `b`, in degrees within [0, 360).
///
/// Identical points have no defined bearing; they report 0° (north).
pub fn bearing_degrees(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Initial bearing from `a` towards `b`, as a compass octant.
pub fn bearing_octant(a: &Coordinate, b: &Coordinate) -> Octant {
    Octant::from_bearing(bearing_degrees(a, b))
}
