//! Static landing page

use axum::response::Html;

pub async fn home() -> Html<&'static str> {
    Html("<h1>Users REST API</h1>")
}
