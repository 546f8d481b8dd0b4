//! Per-stop departure aggregation.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{NormalizedDeparture, RouteId, RouteType, StopId};
use crate::ptv::{
    DepartureOptions, DirectionsForRouteResponse, PtvError, PtvSource, SearchResult,
};

use super::config::DisplayConfig;
use super::normalize::normalize_departures;

/// Fetches and normalizes departures for one stop per call.
///
/// Holds no per-request state, so one aggregator can serve any number of
/// concurrent calls. It knows nothing about which stop is "the train" or
/// "the tram"; that is the caller's concern.
#[derive(Debug)]
pub struct DepartureAggregator<S> {
    source: S,
    display: DisplayConfig,
}

impl<S: PtvSource> DepartureAggregator<S> {
    pub fn new(source: S, display: DisplayConfig) -> Self {
        Self { source, display }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Upcoming departures from `stop_id`, soonest first.
    ///
    /// Issues exactly one provider request. Errors are returned as-is;
    /// an empty list means nothing qualifying is scheduled.
    pub async fn get_departures(
        &self,
        route_type: RouteType,
        stop_id: StopId,
        options: &DepartureOptions,
    ) -> Result<Vec<NormalizedDeparture>, PtvError> {
        self.get_departures_at(route_type, stop_id, options, Utc::now())
            .await
    }

    /// As [`get_departures`](Self::get_departures), measured against `now`.
    pub async fn get_departures_at(
        &self,
        route_type: RouteType,
        stop_id: StopId,
        options: &DepartureOptions,
        now: DateTime<Utc>,
    ) -> Result<Vec<NormalizedDeparture>, PtvError> {
        let response = self.source.departures(route_type, stop_id, options).await?;

        let departures =
            normalize_departures(&response.departures, options.direction_id, now, &self.display)?;

        debug!(
            %route_type,
            %stop_id,
            fetched = response.departures.len(),
            shown = departures.len(),
            "normalized departures"
        );

        Ok(departures)
    }

    pub async fn search_stops(
        &self,
        term: &str,
        route_types: &[RouteType],
    ) -> Result<SearchResult, PtvError> {
        self.source.search_stops(term, route_types).await
    }

    pub async fn directions_for_route(
        &self,
        route_id: RouteId,
    ) -> Result<DirectionsForRouteResponse, PtvError> {
        self.source.directions_for_route(route_id).await
    }
}
