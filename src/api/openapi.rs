//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, index};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book API",
        version = "0.1.0",
        description = "Book catalog REST API with JWT authentication"
    ),
    paths(
        index::index,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::replace_book,
        books::delete_book,
        // Auth
        auth::obtain_token_pair,
        auth::refresh_token,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookFields,
            crate::models::user::TokenPair,
            auth::TokenObtainRequest,
            auth::TokenRefreshRequest,
            auth::AccessTokenResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "index", description = "Landing page"),
        (name = "books", description = "Book management"),
        (name = "auth", description = "Token issuance")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
