//! PTV timetable API HTTP client.
//!
//! Each operation builds a signed URL, issues a single GET and decodes the
//! JSON body. There are no retries; failures are returned to the caller.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{RouteId, RouteType, StopId};

use super::error::PtvError;
use super::signer::{QueryParams, RequestSigner};
use super::source::{DepartureOptions, PtvSource, join_commas};
use super::types::{DeparturesResponse, DirectionsForRouteResponse, SearchResult};

/// Default base URL for the PTV timetable API.
const DEFAULT_BASE_URL: &str = "https://timetableapi.ptv.vic.gov.au";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the PTV client.
#[derive(Clone)]
pub struct PtvConfig {
    /// Developer id, sent as `devid`
    pub dev_id: String,
    /// Signing key; never sent
    pub api_key: String,
    /// Base URL for the API (defaults to production PTV)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PtvConfig {
    /// Create a new config with the given credentials.
    pub fn new(dev_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            dev_id: dev_id.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl fmt::Debug for PtvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PtvConfig")
            .field("dev_id", &self.dev_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// PTV timetable API client.
///
/// Clones share the underlying connection pool and credentials, so one
/// client can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct PtvClient {
    http: reqwest::Client,
    signer: RequestSigner,
}

impl PtvClient {
    /// Create a new PTV client with the given configuration.
    pub fn new(config: PtvConfig) -> Result<Self, PtvError> {
        let signer = RequestSigner::new(config.base_url, config.dev_id, &config.api_key)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, signer })
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, PtvError> {
        let url = self.signer.build_url(path, params);
        debug!(path, params = params.len(), "PTV request");

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(path, error = %e, "PTV request failed");
            PtvError::from(e)
        })?;

        let status = response.status();

        if !status.is_success() {
            warn!(path, status = status.as_u16(), "PTV returned an error status");
            return Err(PtvError::from_status(status));
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| PtvError::malformed(e.to_string(), Some(&body)))
    }
}

impl PtvSource for PtvClient {
    async fn departures(
        &self,
        route_type: RouteType,
        stop_id: StopId,
        options: &DepartureOptions,
    ) -> Result<DeparturesResponse, PtvError> {
        let path = format!("/v3/departures/route_type/{route_type}/stop/{stop_id}");
        self.get_json(&path, &options.to_query()).await
    }

    async fn search_stops(
        &self,
        term: &str,
        route_types: &[RouteType],
    ) -> Result<SearchResult, PtvError> {
        let mut params = QueryParams::new();
        if !route_types.is_empty() {
            params.push("route_types", join_commas(route_types));
        }

        let path = format!("/v3/search/{}", urlencoding::encode(term));
        self.get_json(&path, &params).await
    }

    async fn directions_for_route(
        &self,
        route_id: RouteId,
    ) -> Result<DirectionsForRouteResponse, PtvError> {
        let path = format!("/v3/directions/route/{route_id}");
        self.get_json(&path, &QueryParams::new()).await
    }
}
