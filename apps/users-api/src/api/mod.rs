pub mod health;
pub mod home;

use axum::{Router, middleware, routing::get};
use axum_helpers::server::{create_router, health_router};
use domain_users::{PgUserRepository, UserService, handlers};
use observability::{metrics_handler, metrics_middleware};

use crate::openapi::ApiDoc;
use crate::state::{AppState, Storage};

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &AppState) -> Router {
    match &state.storage {
        Storage::Postgres(db) => {
            handlers::router(UserService::new(PgUserRepository::new(db.clone())))
        }
        Storage::Memory(repository) => handlers::router(UserService::new(repository.clone())),
    }
}

/// Creates a router with the /ready endpoint bound to the storage backend.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Full application router:
/// - `/` landing page
/// - `/api/users/...` resource routes, docs UIs and middleware from `create_router`
/// - `/health` liveness, `/ready` readiness, `/metrics` Prometheus text
pub async fn app(state: AppState) -> std::io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(&state)).await?;

    Ok(router
        .route("/", get(home::home))
        .route("/metrics", get(metrics_handler))
        .merge(health_router(state.config.app))
        .merge(ready_router(state))
        .route_layer(middleware::from_fn(metrics_middleware)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment, StorageBackend};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use domain_users::InMemoryUserRepository;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn memory_state() -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                server: ServerConfig::default(),
                environment: Environment::Development,
                storage: StorageBackend::Memory,
                database: None,
                run_migrations: false,
            },
            storage: Storage::Memory(InMemoryUserRepository::new()),
        }
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_home_banner() {
        let app = app(memory_state()).await.unwrap();

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"<h1>Users REST API</h1>");
    }

    #[tokio::test]
    async fn test_users_mounted_under_api() {
        let app = app(memory_state()).await.unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/api/users/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"name": "Alice", "email": "a@x.com"}).to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(get("/api/users/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let user: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(user, json!({"id": 1, "name": "Alice", "email": "a@x.com"}));
    }

    #[tokio::test]
    async fn test_memory_backend_is_ready() {
        let app = app(memory_state()).await.unwrap();

        let response = app.oneshot(get("/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn test_health_reports_package() {
        let app = app(memory_state()).await.unwrap();

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["name"], "users_api");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = app(memory_state()).await.unwrap();

        let response = app.oneshot(get("/api/nothing")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_on_user_is_405_envelope() {
        let app = app(memory_state()).await.unwrap();

        let request = Request::builder()
            .method("PUT")
            .uri("/api/users/1")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["code"], 1010);
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_openapi_lists_user_paths() {
        let app = app(memory_state()).await.unwrap();

        let response = app.oneshot(get("/api-docs/openapi.json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let doc: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(doc["paths"].get("/api/users/{id}").is_some());
    }
}
