//! PTV (Public Transport Victoria) timetable API client.
//!
//! Key characteristics of the API:
//! - Every request is authenticated by signing `path?query` with HMAC-SHA1
//!   and appending the digest as `signature`
//! - Times are ISO 8601 instants in UTC
//! - Identifiers are small integers scoped by route type

mod client;
mod error;
mod mock;
mod signer;
mod source;
mod types;

pub use client::{PtvClient, PtvConfig};
pub use error::PtvError;
pub use mock::MockPtvClient;
pub use signer::{QueryParams, RequestSigner};
pub use source::{DepartureOptions, PtvSource};
pub use types::{
    ApiStatus, DeparturesResponse, Direction, DirectionsForRouteResponse, RawDeparture, Route,
    SearchResult, Stop,
};
