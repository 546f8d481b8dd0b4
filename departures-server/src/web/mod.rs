//! Web layer for the departures board.
//!
//! Provides the JSON endpoints the board widget polls, plus stop search
//! and route directions for looking up identifiers.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
