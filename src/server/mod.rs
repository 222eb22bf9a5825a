//! HTTP surface: axum routes, error mapping, CORS and the serve loop.
//!
//! # Endpoints
//!
//! - `/` - greeting
//! - `/health` - liveness and provider name
//! - `/years` - supported seasons
//! - `/races/{year}` - season schedule
//! - `/drivers/{year}/{round}` - race entry list
//! - `/lap-times/{year}/{round}/{driver1}/{driver2}` - lap-by-lap comparison

pub mod app;
pub mod error;
pub mod routes;

pub use app::{build_gateway, HttpServer};
pub use routes::AppState;
