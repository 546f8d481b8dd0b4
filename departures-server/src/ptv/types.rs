//! PTV timetable API response DTOs.
//!
//! Field names follow the provider's snake_case JSON. Fields the departure
//! pipeline depends on are required, so a payload missing them fails to
//! decode instead of being guessed at.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DirectionId, RouteId, RouteType, RunId, StopId};

/// Response from `/v3/departures/route_type/{route_type}/stop/{stop_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeparturesResponse {
    pub departures: Vec<RawDeparture>,

    /// Stops referenced by the departures, keyed by stop id. Only present
    /// when requested via `expand`.
    #[serde(default)]
    pub stops: HashMap<String, Stop>,

    #[serde(default)]
    pub routes: HashMap<String, Route>,

    #[serde(default)]
    pub directions: HashMap<String, Direction>,

    pub status: Option<ApiStatus>,
}

/// One departure as the provider reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDeparture {
    pub stop_id: StopId,
    pub route_id: RouteId,
    pub run_id: RunId,
    pub direction_id: DirectionId,

    /// Timetabled departure, ISO 8601 in UTC.
    pub scheduled_departure_utc: String,

    /// Real-time estimate, when the vehicle is tracked.
    pub estimated_departure_utc: Option<String>,

    #[serde(default)]
    pub at_platform: bool,

    pub platform_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub stop_id: StopId,
    pub stop_name: String,
    #[serde(default)]
    pub stop_suburb: String,
    pub route_type: RouteType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub route_id: RouteId,
    pub route_name: String,
    #[serde(default)]
    pub route_number: String,
    pub route_type: RouteType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Direction {
    pub direction_id: DirectionId,
    pub direction_name: String,
    pub route_id: RouteId,
}

/// Response from `/v3/search/{term}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub stops: Vec<Stop>,

    #[serde(default)]
    pub routes: Vec<Route>,

    pub status: Option<ApiStatus>,
}

/// Response from `/v3/directions/route/{route_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectionsForRouteResponse {
    pub directions: Vec<Direction>,
    pub status: Option<ApiStatus>,
}

/// API version and health, attached to every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatus {
    pub version: String,
    pub health: u8,
}
