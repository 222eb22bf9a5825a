use anyhow::Context;
use clap::Parser;
use std::path::Path;
use f1_lap_gateway::utils::{logger, validation::Validate};
use f1_lap_gateway::{build_gateway, CliConfig, GatewayConfig, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置, 命令列參數優先
    let mut config = GatewayConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config file '{}'", cli.config))?;
    cli.apply(&mut config);

    // 初始化日誌
    logger::init_logger(&config.logging.level, config.logging.json);

    tracing::info!("Starting f1-lap-gateway");
    if !Path::new(&cli.config).exists() {
        tracing::info!("Config file {} not found, using defaults", cli.config);
    }
    tracing::debug!("Effective config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!(
        provider = %config.provider.base_url,
        seasons = ?config.seasons.range(),
        status_mapping = ?config.server.status_mapping,
        "Gateway configured"
    );

    let gateway = build_gateway(&config).context("Failed to build the data provider")?;
    let server = HttpServer::new(gateway, config.server.clone())
        .context("Failed to build the HTTP router")?;

    server.start().await.context("HTTP server failed")?;
    Ok(())
}
