//! The provider operations the departure board depends on.
//!
//! This abstraction allows the aggregator to be tested with canned
//! payloads and lets the server run against fixture files.

use std::future::Future;

use crate::domain::{DirectionId, RouteId, RouteType, StopId};

use super::error::PtvError;
use super::signer::QueryParams;
use super::types::{DeparturesResponse, DirectionsForRouteResponse, SearchResult};

/// Optional knobs for a departures request.
///
/// Every field is "not set" by default; only set fields become query
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartureOptions {
    /// Provider-side cap on the number of departures per route.
    pub max_results: Option<u32>,

    /// Restrict to one direction of travel. Sent to the provider and also
    /// applied again locally.
    pub direction_id: Option<DirectionId>,

    pub platform_numbers: Vec<u32>,

    /// Extra dictionaries to include, e.g. `["stop", "route"]`.
    pub expand: Vec<String>,
}

impl DepartureOptions {
    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = Some(n);
        self
    }

    pub fn with_direction(mut self, direction: DirectionId) -> Self {
        self.direction_id = Some(direction);
        self
    }

    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = u32>) -> Self {
        self.platform_numbers = platforms.into_iter().collect();
        self
    }

    pub fn with_expand<S: Into<String>>(mut self, expand: impl IntoIterator<Item = S>) -> Self {
        self.expand = expand.into_iter().map(Into::into).collect();
        self
    }

    /// Query parameters in wire order: `max_results`, `direction_id`,
    /// `platform_numbers`, `expand`.
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();

        if let Some(n) = self.max_results {
            params.push("max_results", n.to_string());
        }

        if let Some(direction) = self.direction_id {
            params.push("direction_id", direction.to_string());
        }

        if !self.platform_numbers.is_empty() {
            params.push("platform_numbers", join_commas(&self.platform_numbers));
        }

        if !self.expand.is_empty() {
            params.push("expand", self.expand.join(","));
        }

        params
    }
}

pub(crate) fn join_commas<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Read-only operations against the timetable provider.
pub trait PtvSource {
    /// Departures from `stop_id` for all routes of `route_type`.
    fn departures(
        &self,
        route_type: RouteType,
        stop_id: StopId,
        options: &DepartureOptions,
    ) -> impl Future<Output = Result<DeparturesResponse, PtvError>> + Send;

    /// Stops and routes matching a free-text term.
    fn search_stops(
        &self,
        term: &str,
        route_types: &[RouteType],
    ) -> impl Future<Output = Result<SearchResult, PtvError>> + Send;

    /// Directions of travel available on a route.
    fn directions_for_route(
        &self,
        route_id: RouteId,
    ) -> impl Future<Output = Result<DirectionsForRouteResponse, PtvError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(params: &QueryParams) -> Vec<(String, String)> {
        params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn unset_options_produce_no_params() {
        assert!(DepartureOptions::default().to_query().is_empty());
    }

    #[test]
    fn options_in_wire_order() {
        let options = DepartureOptions::default()
            .with_expand(["stop", "route"])
            .with_platforms([1, 2])
            .with_direction(DirectionId(1))
            .with_max_results(15);

        assert_eq!(
            render(&options.to_query()),
            vec![
                ("max_results".to_string(), "15".to_string()),
                ("direction_id".to_string(), "1".to_string()),
                ("platform_numbers".to_string(), "1,2".to_string()),
                ("expand".to_string(), "stop,route".to_string()),
            ]
        );
    }

    #[test]
    fn zero_max_results_is_still_sent() {
        let params = DepartureOptions::default().with_max_results(0).to_query();
        assert_eq!(render(&params), vec![("max_results".into(), "0".into())]);
    }

    #[test]
    fn empty_lists_are_omitted() {
        let options = DepartureOptions::default()
            .with_platforms([])
            .with_expand(Vec::<String>::new())
            .with_direction(DirectionId(11));
        assert_eq!(
            render(&options.to_query()),
            vec![("direction_id".into(), "11".into())]
        );
    }
}
