use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, RequestArgs,
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{User, UserArgs};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(User, UserArgs),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router.
///
/// The collection answers on both `/users/` and `/users`.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/users/", get(list_users).post(create_user))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "/users/",
    tag = TAG,
    responses(
        (status = 200, description = "All users, ascending by id", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Create a user
///
/// Arguments may come from the query string, a form body or a JSON body.
#[utoipa::path(
    post,
    path = "/users/",
    tag = TAG,
    request_body = UserArgs,
    responses(
        (status = 201, description = "User created; full collection returned", body = Vec<User>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    RequestArgs(args): RequestArgs<UserArgs>,
) -> UserResult<impl IntoResponse> {
    let users = service.create_user(args).await?;
    Ok((StatusCode::CREATED, Json(users)))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<User>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Replace a user's name and email
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UserArgs,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
    RequestArgs(args): RequestArgs<UserArgs>,
) -> UserResult<Json<User>> {
    let user = service.update_user(id, args).await?;
    Ok(Json(user))
}

/// Delete a user
///
/// `name` and `email` are required but not matched against the stored row.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UserArgs,
    responses(
        (status = 200, description = "User deleted; remaining collection returned", body = Vec<User>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
    RequestArgs(args): RequestArgs<UserArgs>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.delete_user(id, args).await?;
    Ok(Json(users))
}
