//! Mock PTV client for running without API credentials.
//!
//! Loads departure payloads from JSON files and serves them as if they
//! were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{RouteId, RouteType, StopId};

use super::error::PtvError;
use super::source::{DepartureOptions, PtvSource};
use super::types::{DeparturesResponse, DirectionsForRouteResponse, SearchResult};

/// Mock PTV client that serves data from JSON files.
///
/// Payloads are static: request options are ignored, and the aggregator's
/// own filtering is what the caller sees.
#[derive(Debug, Clone)]
pub struct MockPtvClient {
    /// Pre-loaded departure payloads, keyed by stop.
    boards: Arc<HashMap<StopId, DeparturesResponse>>,
}

impl MockPtvClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{stop_id}.json` (e.g., `1103.json`) holding a
    /// departures response.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, PtvError> {
        let data_dir = data_dir.as_ref();
        let mut boards = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            PtvError::malformed(format!("failed to read mock data directory: {e}"), None)
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                PtvError::malformed(format!("failed to read directory entry: {e}"), None)
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stop_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u32>().ok())
                .map(StopId)
                .ok_or_else(|| {
                    PtvError::malformed(format!("invalid stop id in filename: {path:?}"), None)
                })?;

            let json = std::fs::read_to_string(&path)
                .map_err(|e| PtvError::malformed(format!("failed to read {path:?}: {e}"), None))?;

            let board: DeparturesResponse = serde_json::from_str(&json).map_err(|e| {
                PtvError::malformed(format!("failed to parse {path:?}: {e}"), Some(&json))
            })?;

            boards.insert(stop_id, board);
        }

        if boards.is_empty() {
            return Err(PtvError::malformed(
                format!("no mock departure files found in {data_dir:?}"),
                None,
            ));
        }

        Ok(Self {
            boards: Arc::new(boards),
        })
    }

    /// List available stops in the mock data.
    pub fn available_stops(&self) -> Vec<StopId> {
        let mut stops: Vec<_> = self.boards.keys().copied().collect();
        stops.sort_by_key(|s| s.0);
        stops
    }
}

impl PtvSource for MockPtvClient {
    async fn departures(
        &self,
        _route_type: RouteType,
        stop_id: StopId,
        _options: &DepartureOptions,
    ) -> Result<DeparturesResponse, PtvError> {
        self.boards
            .get(&stop_id)
            .cloned()
            .ok_or_else(|| PtvError::Upstream {
                status: Some(404),
                reason: format!("no mock data for stop {stop_id}"),
            })
    }

    /// Matches stop names from the loaded `stops` dictionaries,
    /// case-insensitively.
    async fn search_stops(
        &self,
        term: &str,
        route_types: &[RouteType],
    ) -> Result<SearchResult, PtvError> {
        let needle = term.to_lowercase();

        let mut stops: Vec<_> = self
            .boards
            .values()
            .flat_map(|b| b.stops.values())
            .filter(|s| s.stop_name.to_lowercase().contains(&needle))
            .filter(|s| route_types.is_empty() || route_types.contains(&s.route_type))
            .cloned()
            .collect();
        stops.sort_by_key(|s| s.stop_id.0);
        stops.dedup_by_key(|s| s.stop_id);

        Ok(SearchResult {
            stops,
            ..SearchResult::default()
        })
    }

    async fn directions_for_route(
        &self,
        route_id: RouteId,
    ) -> Result<DirectionsForRouteResponse, PtvError> {
        let mut directions: Vec<_> = self
            .boards
            .values()
            .flat_map(|b| b.directions.values())
            .filter(|d| d.route_id == route_id)
            .cloned()
            .collect();
        directions.sort_by_key(|d| d.direction_id.0);
        directions.dedup_by_key(|d| d.direction_id);

        Ok(DirectionsForRouteResponse {
            directions,
            status: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DirectionId;
    use tempfile::tempdir;

    const TRAIN_BOARD: &str = r#"{
        "departures": [{
            "stop_id": 1103, "route_id": 15, "run_id": 1, "direction_id": 1,
            "scheduled_departure_utc": "2024-01-01T06:42:00Z", "at_platform": false
        }],
        "stops": {"1103": {"stop_id": 1103, "stop_name": "Jewell Station", "stop_suburb": "Brunswick", "route_type": 0}},
        "directions": {
            "1": {"direction_id": 1, "direction_name": "City (Flinders Street)", "route_id": 15},
            "11": {"direction_id": 11, "direction_name": "Upfield", "route_id": 15}
        }
    }"#;

    fn mock_dir() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("1103.json"), TRAIN_BOARD).unwrap();
        std::fs::write(dir.path().join("README.txt"), "ignored").unwrap();
        dir
    }

    #[test]
    fn load_mock_data() {
        let dir = mock_dir();
        let client = MockPtvClient::new(dir.path()).unwrap();
        assert_eq!(client.available_stops(), vec![StopId(1103)]);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(MockPtvClient::new(dir.path()).is_err());
    }

    #[test]
    fn bad_filename_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("jewell.json"), TRAIN_BOARD).unwrap();
        assert!(MockPtvClient::new(dir.path()).is_err());
    }

    #[tokio::test]
    async fn get_departures() {
        let dir = mock_dir();
        let client = MockPtvClient::new(dir.path()).unwrap();

        let resp = client
            .departures(RouteType::TRAIN, StopId(1103), &DepartureOptions::default())
            .await
            .unwrap();
        assert_eq!(resp.departures.len(), 1);
    }

    #[tokio::test]
    async fn unknown_stop_returns_error() {
        let dir = mock_dir();
        let client = MockPtvClient::new(dir.path()).unwrap();

        let err = client
            .departures(RouteType::TRAM, StopId(9999), &DepartureOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn search_and_directions_use_dictionaries() {
        let dir = mock_dir();
        let client = MockPtvClient::new(dir.path()).unwrap();

        let found = client.search_stops("jewell", &[]).await.unwrap();
        assert_eq!(found.stops.len(), 1);

        let trams_only = client
            .search_stops("jewell", &[RouteType::TRAM])
            .await
            .unwrap();
        assert!(trams_only.stops.is_empty());

        let directions = client.directions_for_route(RouteId(15)).await.unwrap();
        let ids: Vec<_> = directions.directions.iter().map(|d| d.direction_id).collect();
        assert_eq!(ids, vec![DirectionId(1), DirectionId(11)]);
    }
}
