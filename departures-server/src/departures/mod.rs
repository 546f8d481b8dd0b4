//! Departure aggregation.
//!
//! Turns a provider departures payload into the short, ordered list a
//! departure board shows, and composes the train and tram rows.

mod aggregator;
mod board;
mod config;
mod normalize;

#[cfg(test)]
pub(crate) mod stub;

pub use aggregator::DepartureAggregator;
pub use board::{BoardConfig, BoardResult, DepartureBoard, StopQuery};
pub use config::DisplayConfig;
pub use normalize::{minutes_until, normalize_departures, parse_utc};
