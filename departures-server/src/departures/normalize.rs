//! Raw departures to display-ready departures.
//!
//! The pipeline is pure: `now` is passed in, captured once by the caller,
//! so every record in one response is measured against the same instant.
//!
//! Order of operations:
//! 1. keep only the requested direction (if one was requested)
//! 2. parse the scheduled UTC instant
//! 3. compute whole minutes until departure
//! 4. drop departures already gone
//! 5. sort by scheduled instant
//! 6. truncate to the display cap and render local labels

use chrono::{DateTime, Utc};

use crate::domain::{DirectionId, NormalizedDeparture};
use crate::ptv::{PtvError, RawDeparture};

use super::config::DisplayConfig;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Normalize a provider payload for display.
///
/// Fails with `MalformedResponse` if any kept record has an unparseable
/// timestamp; an empty result is not an error.
pub fn normalize_departures(
    raw: &[RawDeparture],
    direction: Option<DirectionId>,
    now: DateTime<Utc>,
    display: &DisplayConfig,
) -> Result<Vec<NormalizedDeparture>, PtvError> {
    let mut upcoming = Vec::with_capacity(raw.len());

    for dep in raw
        .iter()
        .filter(|d| direction.is_none_or(|want| d.direction_id == want))
    {
        let scheduled = parse_utc(&dep.scheduled_departure_utc)?;
        let minutes = minutes_until(scheduled, now);
        if minutes >= 0 {
            upcoming.push((scheduled, minutes));
        }
    }

    upcoming.sort_by_key(|(scheduled, _)| *scheduled);
    upcoming.truncate(display.display_cap);

    Ok(upcoming
        .into_iter()
        .map(|(scheduled, minutes_until)| {
            let local = scheduled.with_timezone(&display.timezone);
            NormalizedDeparture {
                scheduled_time_label: local.format("%-I:%M %P").to_string(),
                day_of_week_label: local.format("%a").to_string(),
                minutes_until,
            }
        })
        .collect())
}

/// Parse an ISO 8601 timestamp with an offset into a UTC instant.
pub fn parse_utc(s: &str) -> Result<DateTime<Utc>, PtvError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| PtvError::malformed(format!("invalid departure time {s:?}: {e}"), None))
}

/// Whole minutes from `now` to `at`, rounding half a minute up.
///
/// Departures less than 30 seconds ago round to zero and are still shown.
pub fn minutes_until(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (at - now).num_milliseconds();
    (millis + MILLIS_PER_MINUTE / 2).div_euclid(MILLIS_PER_MINUTE)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{RouteId, RunId, StopId};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 22, 15, 0).unwrap()
    }

    fn raw(offset_secs: i64, direction: u32) -> RawDeparture {
        RawDeparture {
            stop_id: StopId(1),
            route_id: RouteId(1),
            run_id: RunId(0),
            direction_id: DirectionId(direction),
            scheduled_departure_utc: (now() + Duration::seconds(offset_secs)).to_rfc3339(),
            estimated_departure_utc: None,
            at_platform: false,
            platform_number: None,
        }
    }

    proptest! {
        /// Output is future-only, sorted, capped, and direction-filtered
        /// for any input order.
        #[test]
        fn output_is_filtered_sorted_and_capped(
            records in proptest::collection::vec((-7200i64..14400, 0u32..3), 0..40),
            direction in proptest::option::of(0u32..3),
            cap in 0usize..16,
        ) {
            let input: Vec<_> = records.iter().map(|&(s, d)| raw(s, d)).collect();
            let display = DisplayConfig::default().with_display_cap(cap);
            let want = direction.map(DirectionId);

            let out = normalize_departures(&input, want, now(), &display).unwrap();

            prop_assert!(out.len() <= cap);
            prop_assert!(out.iter().all(|d| d.minutes_until >= 0));
            prop_assert!(out.windows(2).all(|w| w[0].minutes_until <= w[1].minutes_until));

            let eligible = records
                .iter()
                .filter(|&&(_, d)| want.is_none_or(|w| w.0 == d))
                .filter(|&&(s, _)| minutes_until(now() + Duration::seconds(s), now()) >= 0)
                .count();
            prop_assert_eq!(out.len(), eligible.min(cap));
        }

        /// Reordering the input never changes the output.
        #[test]
        fn order_independent(
            mut offsets in proptest::collection::vec(-3600i64..7200, 0..30),
        ) {
            let display = DisplayConfig::default();
            let forward: Vec<_> = offsets.iter().map(|&s| raw(s, 1)).collect();
            let a = normalize_departures(&forward, None, now(), &display).unwrap();

            offsets.reverse();
            let backward: Vec<_> = offsets.iter().map(|&s| raw(s, 1)).collect();
            let b = normalize_departures(&backward, None, now(), &display).unwrap();

            prop_assert_eq!(a, b);
        }
    }
}
