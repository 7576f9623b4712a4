//! Book collection and item endpoints

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::Book,
    AppState,
};

use super::AuthenticatedUser;

/// Book id taken from the path. Only plain decimal digits match the route;
/// anything else is answered as an unknown route.
pub struct BookId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BookId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::NotFound("Not found".to_string()));
        }
        raw.parse()
            .map(BookId)
            .map_err(|_| AppError::NotFound("Not found".to_string()))
    }
}

/// List all books
#[utoipa::path(
    get,
    path = "/books/",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every book, ascending by id", body = Vec<Book>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    AuthenticatedUser(_caller): AuthenticatedUser,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books/",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = crate::models::BookFields,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Field-keyed validation errors"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    WithRejection(Json(body), _): WithRejection<Json<Value>, AppError>,
) -> AppResult<(StatusCode, Json<Book>)> {
    tracing::debug!(user_id = caller.user_id, "Create book request");
    let book = state.services.books.create(body).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}/",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    AuthenticatedUser(_caller): AuthenticatedUser,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Replace every field of a book
#[utoipa::path(
    put,
    path = "/books/{id}/",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body = crate::models::BookFields,
    responses(
        (status = 200, description = "Book replaced", body = Book),
        (status = 400, description = "Field-keyed validation errors"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    AuthenticatedUser(caller): AuthenticatedUser,
    WithRejection(Json(body), _): WithRejection<Json<Value>, AppError>,
) -> AppResult<Json<Book>> {
    tracing::debug!(user_id = caller.user_id, book_id = id, "Replace book request");
    let book = state.services.books.replace(id, body).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}/",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> AppResult<StatusCode> {
    tracing::debug!(user_id = caller.user_id, book_id = id, "Delete book request");
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
