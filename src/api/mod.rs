//! API handlers for Bookshelf REST endpoints

pub mod auth;
pub mod books;
pub mod index;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::CallerIdentity, AppState};

/// Extractor for the caller behind a valid access token
pub struct AuthenticatedUser(pub CallerIdentity);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::Authentication(
                        "Authentication credentials were not provided.".to_string(),
                    )
                })?;

        let caller = state.services.auth.validate_bearer_token(bearer.token()).await?;

        Ok(AuthenticatedUser(caller))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/", get(index::index))
        // Books
        .route("/books/", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id/",
            get(books::get_book)
                .put(books::replace_book)
                .delete(books::delete_book),
        )
        // Tokens
        .route("/api/token/", post(auth::obtain_token_pair))
        .route("/api/token/refresh/", post(auth::refresh_token))
        .fallback(not_found)
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
