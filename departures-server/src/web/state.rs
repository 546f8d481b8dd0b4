//! Application state for the web layer.

use std::sync::Arc;

use crate::departures::DepartureBoard;

/// Shared application state.
///
/// Contains the departure board and, through it, the provider client.
pub struct AppState<S> {
    pub board: Arc<DepartureBoard<S>>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(board: DepartureBoard<S>) -> Self {
        Self {
            board: Arc::new(board),
        }
    }
}

// Manual impl: cloning shares the board, so `S` need not be `Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            board: Arc::clone(&self.board),
        }
    }
}
