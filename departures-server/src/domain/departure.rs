//! Display-ready departures.

use serde::Serialize;

/// A departure after normalization, ready for a departure board.
///
/// Only ever constructed for departures that have not yet left, so
/// `minutes_until` is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedDeparture {
    /// Local wall-clock time, e.g. "5:42 pm".
    pub scheduled_time_label: String,

    /// Abbreviated local weekday, e.g. "Mon".
    pub day_of_week_label: String,

    /// Whole minutes from the request time until the scheduled departure.
    pub minutes_until: i64,
}
