use crate::config::toml_config::GatewayConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Command line flags. Values given here override the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "f1-lap-gateway")]
#[command(about = "HTTP API for comparing Formula 1 lap times")]
pub struct CliConfig {
    /// Path to TOML configuration file (optional)
    #[arg(short, long, default_value = "gateway.toml")]
    pub config: String,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,

    /// Base URL of the Ergast-compatible API
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn apply(&self, config: &mut GatewayConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(base_url) = &self.base_url {
            config.provider.base_url = base_url.clone();
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }
}
