//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "0.1.0",
        description = "CRUD over a single users table"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;
