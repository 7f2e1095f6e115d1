//! # Location Controller
//!
//! Owns the active [`ReferencePoint`] and the three flows that can replace it.
//! Every acquire method takes `&mut self`, so a device request cannot overlap
//! with another acquisition on the same controller.

use super::{LocationError, PointSource, PositionError, ReferencePoint};
use crate::geometry::Coordinate;
use crate::storage::{Storage, StorageError, StorageExt, REFERENCE_POINT_KEY};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// The platform's location capability.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, PositionError>;
}

/// A geolocator for platforms without location support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        Err(PositionError::Unsupported)
    }
}

/// A geolocator that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinate);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        Ok(self.0)
    }
}

pub struct LocationController {
    storage: Arc<dyn Storage>,
    geolocator: Arc<dyn Geolocator>,
    timeout: Duration,
    active: Option<ReferencePoint>,
    map_pick_armed: bool,
}

impl LocationController {
    /// Builds a controller, restoring a persisted reference point if one
    /// exists. An unreadable persisted value is discarded rather than failing
    /// startup.
    pub fn restore(
        storage: Arc<dyn Storage>,
        geolocator: Arc<dyn Geolocator>,
        timeout: Duration,
    ) -> Result<Self, LocationError> {
        let active = match storage.load::<ReferencePoint>(REFERENCE_POINT_KEY) {
            Ok(point) => point,
            Err(StorageError::Serde { source, .. }) => {
                warn!(error = %source, "Discarding unreadable reference point");
                storage.remove(REFERENCE_POINT_KEY)?;
                None
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(point) = &active {
            info!(mode = %point.mode(), "Restored reference point");
        }
        Ok(Self {
            storage,
            geolocator,
            timeout,
            active,
            map_pick_armed: false,
        })
    }

    pub fn active(&self) -> Option<&ReferencePoint> {
        self.active.as_ref()
    }

    pub fn is_map_pick_armed(&self) -> bool {
        self.map_pick_armed
    }

    /// Asks the device for its position, bounded by the configured timeout.
    ///
    /// On failure the previous reference point stays active.
    #[instrument(skip(self))]
    pub async fn acquire_from_device(&mut self) -> Result<ReferencePoint, LocationError> {
        self.map_pick_armed = false;
        let coordinate =
            match tokio::time::timeout(self.timeout, self.geolocator.current_position()).await {
                Ok(Ok(coordinate)) => coordinate,
                Ok(Err(reason)) => {
                    warn!(%reason, "Device location failed");
                    return Err(reason.into());
                }
                Err(_) => {
                    warn!(timeout = ?self.timeout, "Device location timed out");
                    return Err(PositionError::Timeout.into());
                }
            };
        self.activate(PointSource::Device { coordinate })
    }

    /// Sets a manually picked coordinate as the reference point.
    #[instrument(skip(self))]
    pub fn acquire_from_map_pick(
        &mut self,
        coordinate: Coordinate,
    ) -> Result<ReferencePoint, LocationError> {
        self.map_pick_armed = false;
        self.activate(PointSource::ManualMap { coordinate })
    }

    /// Enters manual pick mode: the next map click becomes the reference point.
    pub fn arm_map_pick(&mut self) {
        debug!("Map pick armed");
        self.map_pick_armed = true;
    }

    /// Feeds a raw map click. Consumes the armed pick, if any, and disarms it;
    /// clicks while disarmed are ignored and return `None`.
    #[instrument(skip(self))]
    pub fn handle_map_click(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<ReferencePoint>, LocationError> {
        if !self.map_pick_armed {
            return Ok(None);
        }
        self.map_pick_armed = false;
        let coordinate = Coordinate::new(latitude, longitude)?;
        self.acquire_from_map_pick(coordinate).map(Some)
    }

    /// Uses raw search text as the reference point.
    #[instrument(skip(self))]
    pub fn acquire_from_text_query(&mut self, text: &str) -> Result<ReferencePoint, LocationError> {
        self.map_pick_armed = false;
        let query = text.trim();
        if query.is_empty() {
            return Err(LocationError::EmptyQuery);
        }
        self.activate(PointSource::TextQuery {
            query: query.to_string(),
        })
    }

    /// Drops the active reference point, in memory and in storage.
    pub fn clear(&mut self) -> Result<(), LocationError> {
        self.map_pick_armed = false;
        self.storage.remove(REFERENCE_POINT_KEY)?;
        self.active = None;
        info!("Reference point cleared");
        Ok(())
    }

    // Persist first: a failed write leaves the previous point active.
    fn activate(&mut self, source: PointSource) -> Result<ReferencePoint, LocationError> {
        let point = ReferencePoint::new(source);
        self.storage.save(REFERENCE_POINT_KEY, &point)?;
        info!(mode = %point.mode(), "Reference point set");
        self.active = Some(point.clone());
        Ok(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::AcquisitionMode;
    use crate::storage::MemoryStorage;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedGeolocator {
        replies: Mutex<VecDeque<Result<Coordinate, PositionError>>>,
    }

    impl ScriptedGeolocator {
        fn new(replies: Vec<Result<Coordinate, PositionError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
            })
        }
    }

    #[async_trait]
    impl Geolocator for ScriptedGeolocator {
        async fn current_position(&self) -> Result<Coordinate, PositionError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(PositionError::Unsupported))
        }
    }

    struct HangingGeolocator;

    #[async_trait]
    impl Geolocator for HangingGeolocator {
        async fn current_position(&self) -> Result<Coordinate, PositionError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(PositionError::Failed("unreachable".into()))
        }
    }

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn hisar() -> Coordinate {
        Coordinate::new(29.1492, 75.7217).unwrap()
    }

    fn delhi() -> Coordinate {
        Coordinate::new(28.6139, 77.2090).unwrap()
    }

    fn controller(
        storage: Arc<dyn Storage>,
        geolocator: Arc<dyn Geolocator>,
    ) -> LocationController {
        LocationController::restore(storage, geolocator, Duration::from_millis(50)).unwrap()
    }

    #[tokio::test]
    async fn device_fix_replaces_a_manual_pick() {
        let storage = Arc::new(MemoryStorage::new());
        let mut location = controller(storage.clone(), ScriptedGeolocator::new(vec![Ok(delhi())]));

        location.acquire_from_map_pick(hisar()).unwrap();
        assert_eq!(location.active().unwrap().mode(), AcquisitionMode::ManualMap);

        let point = location.acquire_from_device().await.unwrap();
        assert_eq!(point.mode(), AcquisitionMode::Device);
        assert_eq!(location.active().unwrap().coordinate(), Some(delhi()));

        let stored: ReferencePoint = storage.load(REFERENCE_POINT_KEY).unwrap().unwrap();
        assert_eq!(stored.mode(), AcquisitionMode::Device);
    }

    #[tokio::test]
    async fn denied_device_request_keeps_the_previous_point() {
        let storage = Arc::new(MemoryStorage::new());
        let mut location = controller(
            storage.clone(),
            ScriptedGeolocator::new(vec![Err(PositionError::PermissionDenied)]),
        );
        location.acquire_from_map_pick(hisar()).unwrap();

        let err = location.acquire_from_device().await.unwrap_err();
        assert!(matches!(
            err,
            LocationError::Unavailable(PositionError::PermissionDenied)
        ));
        assert_eq!(location.active().unwrap().coordinate(), Some(hisar()));
    }

    #[tokio::test]
    async fn slow_device_times_out() {
        let mut location = controller(Arc::new(MemoryStorage::new()), Arc::new(HangingGeolocator));
        let err = location.acquire_from_device().await.unwrap_err();
        assert!(matches!(
            err,
            LocationError::Unavailable(PositionError::Timeout)
        ));
        assert!(location.active().is_none());
    }

    #[tokio::test]
    async fn unsupported_platform_reports_unavailable() {
        let mut location = controller(Arc::new(MemoryStorage::new()), Arc::new(NoGeolocation));
        assert!(matches!(
            location.acquire_from_device().await,
            Err(LocationError::Unavailable(PositionError::Unsupported))
        ));
    }

    #[test]
    fn armed_pick_is_single_shot() {
        let mut location = controller(Arc::new(MemoryStorage::new()), Arc::new(NoGeolocation));

        assert!(location.handle_map_click(29.0, 75.0).unwrap().is_none());

        location.arm_map_pick();
        let picked = location.handle_map_click(29.1492, 75.7217).unwrap().unwrap();
        assert_eq!(picked.coordinate(), Some(hisar()));
        assert!(!location.is_map_pick_armed());

        assert!(location.handle_map_click(28.6139, 77.2090).unwrap().is_none());
        assert_eq!(location.active().unwrap().coordinate(), Some(hisar()));
    }

    #[test]
    fn out_of_range_click_is_rejected_and_disarms() {
        let mut location = controller(Arc::new(MemoryStorage::new()), Arc::new(NoGeolocation));
        location.arm_map_pick();
        assert!(matches!(
            location.handle_map_click(95.0, 0.0),
            Err(LocationError::InvalidCoordinate(_))
        ));
        assert!(!location.is_map_pick_armed());
        assert!(location.active().is_none());
    }

    #[tokio::test]
    async fn any_acquisition_disarms_a_pending_pick() {
        let mut location = controller(
            Arc::new(MemoryStorage::new()),
            ScriptedGeolocator::new(vec![Ok(delhi())]),
        );

        location.arm_map_pick();
        location.acquire_from_text_query("biryani").unwrap();
        assert!(!location.is_map_pick_armed());

        location.arm_map_pick();
        location.acquire_from_device().await.unwrap();
        assert!(!location.is_map_pick_armed());
    }

    #[test]
    fn text_query_is_trimmed_and_must_not_be_empty() {
        let mut location = controller(Arc::new(MemoryStorage::new()), Arc::new(NoGeolocation));
        let point = location.acquire_from_text_query("  Hisar  ").unwrap();
        assert_eq!(point.query(), Some("Hisar"));
        assert_eq!(point.coordinate(), None);
        assert!(matches!(
            location.acquire_from_text_query("   "),
            Err(LocationError::EmptyQuery)
        ));
        assert_eq!(location.active().unwrap().query(), Some("Hisar"));
    }

    #[test]
    fn restart_restores_the_persisted_point() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        {
            let mut location = controller(storage.clone(), Arc::new(NoGeolocation));
            location.acquire_from_map_pick(hisar()).unwrap();
        }
        let restored = controller(storage.clone(), Arc::new(NoGeolocation));
        assert_eq!(restored.active().unwrap().coordinate(), Some(hisar()));

        let mut restored = restored;
        restored.clear().unwrap();
        assert!(storage.get(REFERENCE_POINT_KEY).unwrap().is_none());
    }

    #[test]
    fn corrupt_persisted_point_is_discarded() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        storage.set(REFERENCE_POINT_KEY, "{\"garbage\":true}").unwrap();
        let location = controller(storage.clone(), Arc::new(NoGeolocation));
        assert!(location.active().is_none());
        assert!(storage.get(REFERENCE_POINT_KEY).unwrap().is_none());
    }

    #[test]
    fn failed_write_leaves_previous_point_active() {
        let mut location = controller(Arc::new(BrokenStorage), Arc::new(NoGeolocation));
        assert!(matches!(
            location.acquire_from_map_pick(hisar()),
            Err(LocationError::Storage(_))
        ));
        assert!(location.active().is_none());
    }
}
