pub mod api;
pub mod commands;
pub mod poller;

pub use api::{ApiClient, ApiError, ControlAction, ControlRequest, Countdown};
pub use commands::CommandDispatcher;
pub use poller::{poll_once, spawn_poller, PollHandle};
