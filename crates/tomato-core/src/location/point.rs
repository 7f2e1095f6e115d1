//! The active "where the user is" value.

use crate::geometry::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Which acquisition flow produced a reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcquisitionMode {
    Device,
    ManualMap,
    TextQuery,
}

impl Display for AcquisitionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AcquisitionMode::Device => "device",
            AcquisitionMode::ManualMap => "manual-map",
            AcquisitionMode::TextQuery => "text-query",
        })
    }
}

/// The payload each mode carries. A text query is kept raw; resolving it is
/// left to the restaurant search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum PointSource {
    Device { coordinate: Coordinate },
    ManualMap { coordinate: Coordinate },
    TextQuery { query: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub source: PointSource,
    pub recorded_at: DateTime<Utc>,
}

impl ReferencePoint {
    pub fn new(source: PointSource) -> Self {
        Self {
            source,
            recorded_at: Utc::now(),
        }
    }

    pub fn mode(&self) -> AcquisitionMode {
        match self.source {
            PointSource::Device { .. } => AcquisitionMode::Device,
            PointSource::ManualMap { .. } => AcquisitionMode::ManualMap,
            PointSource::TextQuery { .. } => AcquisitionMode::TextQuery,
        }
    }

    /// Concrete coordinates, when the mode has them.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match &self.source {
            PointSource::Device { coordinate } | PointSource::ManualMap { coordinate } => {
                Some(*coordinate)
            }
            PointSource::TextQuery { .. } => None,
        }
    }

    pub fn query(&self) -> Option<&str> {
        match &self.source {
            PointSource::TextQuery { query } => Some(query),
            _ => None,
        }
    }
}
