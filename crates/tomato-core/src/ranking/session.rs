//! # Search Session
//!
//! A newer search supersedes an older one without cancelling it, so the older
//! response can still arrive later. The session hands out a ticket per search
//! and only accepts the completion that carries the latest ticket.

use super::{RankedRestaurant, RankingError};
use tracing::debug;

/// Identity of one issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

/// What [`SearchSession::complete`] did with a response.
#[derive(Debug, PartialEq)]
pub enum Completion {
    /// The results are now the displayed set.
    Applied,
    /// A newer search was issued; the response was dropped.
    Stale,
    /// The session was closed; the response was dropped.
    Closed,
    /// The latest search failed; the previous results stay displayed.
    Failed(RankingError),
}

#[derive(Debug)]
pub struct SearchSession {
    issued: u64,
    open: bool,
    results: Option<Vec<RankedRestaurant>>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            issued: 0,
            open: true,
            results: None,
        }
    }

    /// Issues the ticket for a new search, superseding every earlier one.
    pub fn begin(&mut self) -> SearchTicket {
        self.issued += 1;
        SearchTicket(self.issued)
    }

    pub fn is_latest(&self, ticket: SearchTicket) -> bool {
        self.open && ticket.0 == self.issued
    }

    /// Offers the outcome of the search identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<RankedRestaurant>, RankingError>,
    ) -> Completion {
        if !self.open {
            debug!(ticket = ticket.0, "Dropping response for closed session");
            return Completion::Closed;
        }
        if ticket.0 != self.issued {
            debug!(ticket = ticket.0, latest = self.issued, "Dropping stale response");
            return Completion::Stale;
        }
        match outcome {
            Ok(results) => {
                self.results = Some(results);
                Completion::Applied
            }
            Err(e) => Completion::Failed(e),
        }
    }

    /// The displayed results, if any search has succeeded.
    pub fn results(&self) -> Option<&[RankedRestaurant]> {
        self.results.as_deref()
    }

    /// Makes every in-flight and future completion inert.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;
    use crate::model::{Restaurant, RestaurantId};
    use crate::restaurant_actor::RestaurantError;
    use chrono::Utc;

    fn ranked(id: u32) -> RankedRestaurant {
        RankedRestaurant {
            restaurant: Restaurant {
                id: RestaurantId(id),
                name: format!("r{id}"),
                cuisine: "Thai".into(),
                rating: 4.0,
                price_range: "$".into(),
                address: String::new(),
                coordinate: Coordinate::new(0.0, 0.0).unwrap(),
                image_url: String::new(),
                added_at: Utc::now(),
                menu: vec![],
            },
            proximity: None,
        }
    }

    fn shown(session: &SearchSession) -> Vec<u32> {
        session
            .results()
            .unwrap_or_default()
            .iter()
            .map(|r| r.restaurant.id.0)
            .collect()
    }

    #[test]
    fn late_response_from_a_superseded_search_is_dropped() {
        let mut session = SearchSession::new();
        let first = session.begin();
        let second = session.begin();

        assert_eq!(session.complete(second, Ok(vec![ranked(2)])), Completion::Applied);
        assert_eq!(session.complete(first, Ok(vec![ranked(1)])), Completion::Stale);
        assert_eq!(shown(&session), [2]);
    }

    #[test]
    fn failure_keeps_the_previous_results() {
        let mut session = SearchSession::new();
        let first = session.begin();
        session.complete(first, Ok(vec![ranked(1), ranked(3)]));

        let second = session.begin();
        let err = RankingError::FetchFailed(RestaurantError::ActorCommunicationError(
            "offline".into(),
        ));
        assert_eq!(
            session.complete(second, Err(err.clone())),
            Completion::Failed(err)
        );
        assert_eq!(shown(&session), [1, 3]);
    }

    #[test]
    fn closing_makes_in_flight_responses_inert() {
        let mut session = SearchSession::new();
        let ticket = session.begin();
        session.close();

        assert!(!session.is_latest(ticket));
        assert_eq!(session.complete(ticket, Ok(vec![ranked(1)])), Completion::Closed);
        assert!(session.results().is_none());
    }
}
