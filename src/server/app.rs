use crate::adapters::ErgastProvider;
use crate::config::toml_config::{GatewayConfig, ServerConfig};
use crate::core::cache::CachedProvider;
use crate::core::gateway::Gateway;
use crate::domain::ports::MotorsportDataProvider;
use crate::server::routes::{api_routes, AppState};
use crate::utils::error::{GatewayError, Result};
use axum::http::HeaderValue;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Wires the configured provider (optionally behind the session cache) into a gateway.
pub fn build_gateway(config: &GatewayConfig) -> Result<Arc<Gateway>> {
    let ergast = ErgastProvider::from_config(&config.provider)?;

    let provider: Arc<dyn MotorsportDataProvider> = if config.cache.enabled {
        tracing::info!(
            ttl_seconds = config.cache.ttl_seconds,
            "Session cache enabled"
        );
        Arc::new(CachedProvider::new(
            ergast,
            Duration::from_secs(config.cache.ttl_seconds),
        ))
    } else {
        Arc::new(ergast)
    };

    Ok(Arc::new(Gateway::new(provider, config.seasons.range())))
}

pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Fails when a configured CORS origin is not a valid header value.
    pub fn new(gateway: Arc<Gateway>, config: ServerConfig) -> Result<Self> {
        let router = Self::build_router(gateway, &config)?;
        Ok(Self { config, router })
    }

    fn build_router(gateway: Arc<Gateway>, config: &ServerConfig) -> Result<Router> {
        let state = AppState::new(gateway, config.status_mapping);

        Ok(api_routes(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.cors_origins)?))
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serves until Ctrl-C.
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self.socket_addr().parse().map_err(|e| {
            GatewayError::InvalidConfigValue {
                field: "server.host".to_string(),
                value: self.socket_addr(),
                reason: format!("{}", e),
            }
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("🚀 F1 lap time gateway listening on http://{}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// No configured origins means no cross-origin access at all.
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::new());
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| GatewayError::InvalidConfigValue {
                field: "server.cors_origins".to_string(),
                value: origin.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Credentials cannot be combined with wildcards, so methods and
    // headers mirror whatever the preflight asks for.
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
