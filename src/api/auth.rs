//! Token endpoints

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{field_errors, AppError, AppResult},
    models::TokenPair,
    AppState,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenObtainRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub username: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRefreshRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// Obtain an access/refresh token pair
#[utoipa::path(
    post,
    path = "/api/token/",
    tag = "auth",
    request_body = TokenObtainRequest,
    responses(
        (status = 200, description = "Token pair issued", body = TokenPair),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn obtain_token_pair(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<TokenObtainRequest>, AppError>,
) -> AppResult<Json<TokenPair>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(field_errors(&e, &["username", "password"])))?;

    let pair = state
        .services
        .auth
        .issue_token_pair(&request.username, &request.password)
        .await?;

    tracing::info!(username = %request.username, "Issued token pair");
    Ok(Json(pair))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/token/refresh/",
    tag = "auth",
    request_body = TokenRefreshRequest,
    responses(
        (status = 200, description = "Access token issued", body = AccessTokenResponse),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Invalid or expired refresh token", body = crate::error::ErrorResponse)
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<TokenRefreshRequest>, AppError>,
) -> AppResult<Json<AccessTokenResponse>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(field_errors(&e, &["refresh"])))?;

    let access = state.services.auth.refresh_access_token(&request.refresh).await?;
    Ok(Json(AccessTokenResponse { access }))
}
