//! Domain types shared by the provider client and the departure board.
//!
//! Identifiers are thin newtypes over the provider's integers; the only
//! record that leaves this crate's core is [`NormalizedDeparture`].

mod departure;
mod ids;

pub use departure::NormalizedDeparture;
pub use ids::{DirectionId, RouteId, RouteType, RunId, StopId};
