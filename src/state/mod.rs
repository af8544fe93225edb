//! Dashboard state as explicit slots updated through a reducer.

pub mod action;
pub mod dashboard_state;

pub use action::{Action, Effect, Move};
pub use dashboard_state::{DashboardState, EditSession, ErrorSlot, ErrorSource, GridContent, GRID_COLUMNS};
