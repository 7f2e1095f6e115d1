use super::{rank_candidates, RankedRestaurant, RecencyPolicy, SearchRequest};
use crate::clients::RestaurantStore;
use crate::location::ReferencePoint;
use crate::model::{MenuItem, MenuSort, RestaurantId};
use crate::restaurant_actor::RestaurantError;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RankingError {
    /// The store could not be reached or rejected the read. Not retried.
    #[error("fetch failed: {0}")]
    FetchFailed(#[from] RestaurantError),

    #[error("radius must be a positive number of kilometres, got {0}")]
    InvalidRadius(f64),
}

/// Fetches candidates and ranks them around the active reference point.
pub struct RankingService<S> {
    store: S,
    recency: RecencyPolicy,
}

impl<S: RestaurantStore> RankingService<S> {
    pub fn new(store: S, recency: RecencyPolicy) -> Self {
        Self { store, recency }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one search.
    ///
    /// The text query comes from the request, or else from a text-query
    /// reference point. When there is a query the store is searched by text
    /// alone; otherwise by the point's coordinates, if it has any. Distances
    /// are annotated whenever the point has coordinates.
    #[instrument(skip(self, point), fields(mode = ?point.map(ReferencePoint::mode)))]
    pub async fn rank(
        &self,
        point: Option<&ReferencePoint>,
        request: &SearchRequest,
    ) -> Result<Vec<RankedRestaurant>, RankingError> {
        // Reject before fetching.
        request.validate()?;

        let origin = point.and_then(ReferencePoint::coordinate);
        let query = request
            .query
            .as_deref()
            .or_else(|| point.and_then(ReferencePoint::query))
            .map(str::trim)
            .filter(|q| !q.is_empty());
        let near = if query.is_some() { None } else { origin };

        let candidates = self.store.search(query, near).await.map_err(|e| {
            warn!(error = %e, "Restaurant search failed");
            RankingError::FetchFailed(e)
        })?;
        let fetched = candidates.len();

        let ranked = rank_candidates(candidates, origin.as_ref(), request, &self.recency)?;
        debug!(fetched, ranked = ranked.len(), "Ranking complete");
        Ok(ranked)
    }

    /// Loads a menu in the requested order.
    #[instrument(skip(self))]
    pub async fn menu(
        &self,
        id: RestaurantId,
        sort: MenuSort,
    ) -> Result<Vec<MenuItem>, RankingError> {
        let mut menu = self.store.menu(id).await?;
        sort.apply(&mut menu);
        Ok(menu)
    }
}
