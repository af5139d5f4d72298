//! # Axum Helpers
//!
//! Utilities, middleware and helpers shared by the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: integer path ids, merged request arguments
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router::<ApiDoc>(axum::Router::new()).await?;
//!     let app = router.merge(health_router(app_info!()));
//!     create_production_app(
//!         app,
//!         &ServerConfig::default(),
//!         std::time::Duration::from_secs(30),
//!         async {},
//!     )
//!     .await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{
    cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, RequestArgs};
