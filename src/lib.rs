pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "server")]
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::AppConfig;
pub use core::engine::{RecapEngine, RecapSettings};
pub use domain::model::RecapOutcome;
pub use utils::error::{RecapError, Result};
