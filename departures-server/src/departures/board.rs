//! The two-row departure board: trains and trams.
//!
//! Each row is an independent aggregator call. Both run concurrently and
//! are awaited separately, so one failing row never empties the other.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::{DirectionId, NormalizedDeparture, RouteType, StopId};
use crate::ptv::{DepartureOptions, PtvError, PtvSource};

use super::aggregator::DepartureAggregator;

/// Which departures one board row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopQuery {
    pub route_type: RouteType,
    pub stop_id: StopId,
    pub direction_id: Option<DirectionId>,
    pub max_results: Option<u32>,
}

impl StopQuery {
    pub fn new(route_type: RouteType, stop_id: StopId) -> Self {
        Self {
            route_type,
            stop_id,
            direction_id: None,
            max_results: None,
        }
    }

    pub fn with_direction(mut self, direction: DirectionId) -> Self {
        self.direction_id = Some(direction);
        self
    }

    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = Some(n);
        self
    }

    pub fn options(&self) -> DepartureOptions {
        DepartureOptions {
            max_results: self.max_results,
            direction_id: self.direction_id,
            ..DepartureOptions::default()
        }
    }
}

/// Stops shown on the board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub train: StopQuery,
    pub tram: StopQuery,
}

/// Outcome of one board refresh. Rows succeed or fail independently.
#[derive(Debug)]
pub struct BoardResult {
    pub trains: Result<Vec<NormalizedDeparture>, PtvError>,
    pub trams: Result<Vec<NormalizedDeparture>, PtvError>,
}

pub struct DepartureBoard<S> {
    aggregator: DepartureAggregator<S>,
    config: BoardConfig,
}

impl<S: PtvSource> DepartureBoard<S> {
    pub fn new(aggregator: DepartureAggregator<S>, config: BoardConfig) -> Self {
        Self { aggregator, config }
    }

    pub fn aggregator(&self) -> &DepartureAggregator<S> {
        &self.aggregator
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Refresh both rows concurrently.
    pub async fn fetch(&self) -> BoardResult {
        self.fetch_at(Utc::now()).await
    }

    pub async fn fetch_at(&self, now: DateTime<Utc>) -> BoardResult {
        let (trains, trams) = tokio::join!(
            self.row(&self.config.train, now),
            self.row(&self.config.tram, now),
        );

        if let Err(e) = &trains {
            warn!(stop_id = %self.config.train.stop_id, error = %e, "train departures unavailable");
        }
        if let Err(e) = &trams {
            warn!(stop_id = %self.config.tram.stop_id, error = %e, "tram departures unavailable");
        }

        BoardResult { trains, trams }
    }

    async fn row(
        &self,
        query: &StopQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<NormalizedDeparture>, PtvError> {
        self.aggregator
            .get_departures_at(query.route_type, query.stop_id, &query.options(), now)
            .await
    }
}
