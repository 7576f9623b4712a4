//! Unauthenticated landing endpoint

/// Plain-text greeting
#[utoipa::path(
    get,
    path = "/",
    tag = "index",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    )
)]
pub async fn index() -> &'static str {
    "Hello world. You're at the bookshelf index."
}
