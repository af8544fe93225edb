pub mod config;
pub mod duration;
pub mod logging;
pub mod paths;
pub mod storage;
pub mod validation;

pub use config::*;
pub use duration::*;
pub use paths::*;
pub use storage::LocalStore;
pub use validation::*;
