//! Canned `PtvSource` for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::Barrier;

use crate::domain::{DirectionId, RouteId, RouteType, RunId, StopId};
use crate::ptv::{
    DepartureOptions, DeparturesResponse, DirectionsForRouteResponse, PtvError, PtvSource,
    RawDeparture, SearchResult,
};

pub(crate) type Request = (RouteType, StopId, DepartureOptions);

/// Serves fixed payloads per stop and records every departures request.
#[derive(Default)]
pub(crate) struct StubSource {
    /// Payload per stop, or the HTTP status to fail with.
    boards: HashMap<StopId, Result<Vec<RawDeparture>, u16>>,
    requests: Mutex<Vec<Request>>,
    /// When set, every departures call waits here before answering.
    gate: Option<Arc<Barrier>>,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_board(mut self, stop: StopId, departures: Vec<RawDeparture>) -> Self {
        self.boards.insert(stop, Ok(departures));
        self
    }

    pub(crate) fn with_failure(mut self, stop: StopId, status: u16) -> Self {
        self.boards.insert(stop, Err(status));
        self
    }

    pub(crate) fn with_gate(mut self, gate: Arc<Barrier>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl PtvSource for StubSource {
    async fn departures(
        &self,
        route_type: RouteType,
        stop_id: StopId,
        options: &DepartureOptions,
    ) -> Result<DeparturesResponse, PtvError> {
        self.requests
            .lock()
            .unwrap()
            .push((route_type, stop_id, options.clone()));

        if let Some(gate) = &self.gate {
            gate.wait().await;
        }

        match self.boards.get(&stop_id) {
            Some(Err(status)) => Err(PtvError::from_status(
                reqwest::StatusCode::from_u16(*status).unwrap(),
            )),
            Some(Ok(departures)) => Ok(response(departures.clone())),
            None => Ok(response(Vec::new())),
        }
    }

    async fn search_stops(
        &self,
        _term: &str,
        _route_types: &[RouteType],
    ) -> Result<SearchResult, PtvError> {
        Ok(SearchResult::default())
    }

    async fn directions_for_route(
        &self,
        _route_id: RouteId,
    ) -> Result<DirectionsForRouteResponse, PtvError> {
        Ok(DirectionsForRouteResponse::default())
    }
}

fn response(departures: Vec<RawDeparture>) -> DeparturesResponse {
    DeparturesResponse {
        departures,
        stops: HashMap::new(),
        routes: HashMap::new(),
        directions: HashMap::new(),
        status: None,
    }
}

pub(crate) fn raw_departure(
    stop: StopId,
    scheduled: DateTime<Utc>,
    direction: u32,
) -> RawDeparture {
    RawDeparture {
        stop_id: stop,
        route_id: RouteId(1),
        run_id: RunId(scheduled.timestamp()),
        direction_id: DirectionId(direction),
        scheduled_departure_utc: scheduled.to_rfc3339(),
        estimated_departure_utc: None,
        at_platform: false,
        platform_number: None,
    }
}
