//! Error types for location acquisition.

use crate::geometry::GeoError;
use crate::storage::StorageError;
use thiserror::Error;

/// Why the device could not report a position.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PositionError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("timed out waiting for a position fix")]
    Timeout,
    #[error("location capability not supported")]
    Unsupported,
    #[error("position unavailable: {0}")]
    Failed(String),
}

/// Errors that can occur while acquiring or persisting the reference point.
#[derive(Debug, Error)]
pub enum LocationError {
    /// Device location was denied, timed out or is unsupported. Any previous
    /// reference point is still active.
    #[error("location unavailable: {0}")]
    Unavailable(#[from] PositionError),

    /// A map interaction produced an out-of-range coordinate.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] GeoError),

    #[error("search text must not be empty")]
    EmptyQuery,

    #[error("could not persist reference point: {0}")]
    Storage(#[from] StorageError),
}
