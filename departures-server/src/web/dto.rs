//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{NormalizedDeparture, RouteType};

/// A departure as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureView {
    /// Local time, e.g. "5:42 pm"
    pub scheduled_time: String,

    /// Abbreviated weekday, e.g. "Mon"
    pub day_of_week: String,
}

impl From<&NormalizedDeparture> for DepartureView {
    fn from(dep: &NormalizedDeparture) -> Self {
        Self {
            scheduled_time: dep.scheduled_time_label.clone(),
            day_of_week: dep.day_of_week_label.clone(),
        }
    }
}

/// Response for the departures board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardResponse {
    pub trains: Vec<DepartureView>,
    pub trams: Vec<DepartureView>,
}

/// Request to search stops.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Free-text search term
    pub term: String,

    /// Comma-separated route types, e.g. "0,1"
    pub route_types: Option<String>,
}

impl StopSearchRequest {
    /// Parse `route_types`; absent or blank means all types.
    pub fn parsed_route_types(&self) -> Result<Vec<RouteType>, String> {
        let Some(raw) = self.route_types.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u32>()
                    .map(RouteType)
                    .map_err(|_| format!("Invalid route type: {s}"))
            })
            .collect()
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
