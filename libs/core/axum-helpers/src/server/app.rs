use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Creates a configured Axum router with common middleware and documentation.
///
/// This sets up:
/// - OpenAPI documentation (Swagger UI, ReDoc, RapiDoc, Scalar)
/// - API routes nested under `/api`
/// - Tracing, security headers, CORS and compression layers
/// - JSON 404 and 405 fallbacks
///
/// Health endpoints (`/health`, `/ready`) are merged by the app itself.
///
/// CORS comes from `CORS_ALLOWED_ORIGIN` (comma-separated); when unset every
/// origin is allowed.
///
/// # Errors
/// Returns an error if `CORS_ALLOWED_ORIGIN` is set but empty or invalid.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_router;
///
/// let api_routes = domain_users::handlers::router(service);
/// let router = create_router::<ApiDoc>(api_routes).await?;
/// ```
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors_layer = cors_layer_from_env()?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis.method_not_allowed_fallback(method_not_allowed))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup` bounded by
/// `shutdown_timeout`.
///
/// In-flight requests are drained before the function returns.
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use axum_helpers::server::{close_postgres, create_production_app};
///
/// create_production_app(
///     router,
///     &config.server,
///     Duration::from_secs(30),
///     async move { close_postgres(db, "main").await },
/// )
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "Test API"))]
    struct TestDoc;

    async fn router() -> Router {
        let apis = Router::new().route("/ping", get(|| async { "pong" }));
        create_router::<TestDoc>(apis).await.unwrap()
    }

    #[tokio::test]
    async fn test_api_routes_nested_under_api() {
        let response = router()
            .await
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let response = router()
            .await
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_wrong_method_returns_json_405() {
        let response = router()
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 1010);
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let response = router()
            .await
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
