use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Environment variable holding comma-separated allowed origins.
pub const CORS_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";

/// Creates a CORS layer with common settings for API services.
///
/// - Listed allowed origins
/// - Methods: GET, POST, PUT, DELETE, PATCH, OPTIONS
/// - Headers: Content-Type, Accept
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Creates a permissive CORS layer for development.
///
/// Allows any origin. Do not use in production.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Builds the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Unset falls back to [`create_permissive_cors_layer`]. A set but empty or
/// unparsable value is an error.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let Ok(origins_str) = std::env::var(CORS_ALLOWED_ORIGIN) else {
        warn!("{} not set, using permissive CORS", CORS_ALLOWED_ORIGIN);
        return Ok(create_permissive_cors_layer());
    };

    let allowed_origins = parse_origins(&origins_str)?;
    info!("CORS configured with allowed origins: {}", origins_str);

    Ok(create_cors_layer(allowed_origins))
}

fn parse_origins(origins: &str) -> io::Result<Vec<HeaderValue>> {
    let parsed = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ALLOWED_ORIGIN, e),
            )
        })?;

    if parsed.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} cannot be empty", CORS_ALLOWED_ORIGIN),
        ));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        let origins = parse_origins("http://localhost:3000, ,https://example.com").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://example.com");
    }

    #[test]
    fn test_parse_origins_empty_is_error() {
        let err = parse_origins(" , ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_cors_layer_from_env_unset_is_permissive() {
        temp_env::with_var_unset(CORS_ALLOWED_ORIGIN, || {
            assert!(cors_layer_from_env().is_ok());
        });
    }

    #[test]
    fn test_cors_layer_from_env_rejects_empty() {
        temp_env::with_var(CORS_ALLOWED_ORIGIN, Some(""), || {
            assert!(cors_layer_from_env().is_err());
        });
    }
}
