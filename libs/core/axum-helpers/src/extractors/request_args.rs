//! Request-argument extractor merging query string, form and JSON bodies.

use crate::errors::AppError;
use axum::{
    Form, Json,
    extract::{FromRequest, Query, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Collects named request arguments from every place a client may send them.
///
/// Sources, in increasing precedence:
/// 1. the URL query string
/// 2. an `application/x-www-form-urlencoded` body
/// 3. an `application/json` object body
///
/// Scalar JSON values are converted to strings and `null` counts as absent,
/// so `T` sees the same string arguments whichever source carried them.
/// The merged map is then deserialized into `T`; validation is left to the
/// caller.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::RequestArgs;
///
/// #[derive(serde::Deserialize)]
/// struct Args { name: Option<String> }
///
/// async fn create(RequestArgs(args): RequestArgs<Args>) -> String {
///     args.name.unwrap_or_default()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestArgs<T>(pub T);

impl<T, S> FromRequest<S> for RequestArgs<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut args = Map::new();

        let Query(query) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        for (key, value) in query {
            args.insert(key, Value::String(value));
        }

        match body_kind(&req) {
            BodyKind::Form => {
                let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                for (key, value) in fields {
                    args.insert(key, Value::String(value));
                }
            }
            BodyKind::Json => {
                let Json(body) = Json::<Value>::from_request(req, state).await?;
                let Value::Object(fields) = body else {
                    return Err(AppError::BadRequest(
                        "JSON body must be an object".to_string(),
                    ));
                };
                for (key, value) in fields {
                    match value {
                        Value::Null => {
                            args.remove(&key);
                        }
                        Value::Bool(b) => {
                            args.insert(key, Value::String(b.to_string()));
                        }
                        Value::Number(n) => {
                            args.insert(key, Value::String(n.to_string()));
                        }
                        other => {
                            args.insert(key, other);
                        }
                    }
                }
            }
            BodyKind::Other => {}
        }

        serde_json::from_value(Value::Object(args))
            .map(RequestArgs)
            .map_err(|e| AppError::BadRequest(format!("Invalid request arguments: {}", e)))
    }
}

enum BodyKind {
    Form,
    Json,
    Other,
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(content_type) = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}
