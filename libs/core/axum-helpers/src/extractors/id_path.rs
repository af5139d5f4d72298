//! Integer path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extractor for non-negative integer `{id}` path parameters.
///
/// Anything that is not a plain run of ASCII digits (signs, whitespace,
/// decimals) is treated as an unmatched route and rejected with 404.
/// Digit runs past `i64::MAX` saturate, so every all-digit id reaches the
/// handler and the resource decides whether it exists.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_user(IdPath(id): IdPath) -> String {
///     format!("User ID: {}", id)
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;

        parse_id(&raw).map(IdPath).ok_or_else(|| {
            tracing::debug!(raw_id = %raw, "Path id is not a non-negative integer");
            AppError::NotFound("The requested resource was not found".to_string())
        })
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // only overflow can fail here
    Some(raw.parse().unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    #[test]
    fn test_parse_id_accepts_digits() {
        assert_eq!(parse_id("0"), Some(0));
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("007"), Some(7));
    }

    #[test]
    fn test_parse_id_rejects_non_digits() {
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("+1"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);
        assert_eq!(parse_id(" 1"), None);
    }

    #[test]
    fn test_parse_id_keeps_large_digit_runs() {
        assert_eq!(parse_id("2147483648"), Some(2_147_483_648));
        assert_eq!(parse_id("99999999999999999999999"), Some(i64::MAX));
    }

    #[tokio::test]
    async fn test_extractor_rejects_with_404() {
        let app = Router::new().route(
            "/users/{id}",
            get(|IdPath(id): IdPath| async move { id.to_string() }),
        );

        let ok = app
            .clone()
            .oneshot(Request::builder().uri("/users/5").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let large = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/users/99999999999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(large.status(), StatusCode::OK);

        let bad = app
            .oneshot(Request::builder().uri("/users/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(bad.status(), StatusCode::NOT_FOUND);
    }
}
