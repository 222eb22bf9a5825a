pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(test)]
mod test_utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::ErgastProvider;
pub use crate::config::{GatewayConfig, StatusMapping};
pub use crate::core::{cache::CachedProvider, gateway::Gateway};
pub use crate::domain::ports::MotorsportDataProvider;
pub use crate::server::{build_gateway, HttpServer};
pub use crate::utils::error::{GatewayError, Result};
