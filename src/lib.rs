pub mod cli;
pub mod models;
pub mod services;
pub mod state;
pub mod test_utils;
pub mod ui;
pub mod utils;

pub use models::*;
