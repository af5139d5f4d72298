//! Axum middleware for automatic HTTP request metrics.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, Response},
    middleware::Next,
};
use metrics::{counter, histogram};
use std::time::Instant;

/// Records request metrics for every response.
///
/// - `http_requests_total` - method, path, status, status_class
/// - `http_request_duration_seconds` - method, path
/// - `http_requests_errors_total` - 4xx and 5xx only
///
/// `path` is the matched route template (`/api/users/{id}`), so ids do not
/// explode label cardinality. Unmatched requests are labelled `unmatched`.
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use observability::metrics_middleware;
///
/// let app = router.layer(middleware::from_fn(metrics_middleware));
/// ```
pub async fn metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status().as_u16().to_string();
    let status_class = match response.status().as_u16() {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone(),
        "status_class" => status_class
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "path" => path.clone()
    )
    .record(duration.as_secs_f64());

    if response.status().is_client_error() || response.status().is_server_error() {
        counter!(
            "http_requests_errors_total",
            "method" => method,
            "path" => path,
            "status" => status
        )
        .increment(1);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_middleware_passes_response_through() {
        let app = Router::new()
            .route("/users/{id}", get(|| async { StatusCode::NOT_FOUND }))
            .layer(middleware::from_fn(metrics_middleware));

        let response = app
            .oneshot(Request::builder().uri("/users/9").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
