//! Token issuance and bearer validation

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Duration;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{CallerIdentity, TokenClaims, TokenPair, TokenType, User},
    repository::UserStore,
};

const BAD_CREDENTIALS: &str = "No active account found with the given credentials";
const BAD_TOKEN: &str = "Token is invalid or expired";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Check credentials and issue a fresh access/refresh pair
    pub async fn issue_token_pair(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::Authentication(BAD_CREDENTIALS.to_string()))?;

        if !self.verify_password(&user, password)? {
            tracing::debug!(username, "Rejected token request: wrong password");
            return Err(AppError::Authentication(BAD_CREDENTIALS.to_string()));
        }

        Ok(TokenPair {
            refresh: self.sign(TokenType::Refresh, &user)?,
            access: self.sign(TokenType::Access, &user)?,
        })
    }

    /// Exchange a refresh token for a new access token. Refresh tokens are not rotated.
    pub async fn refresh_access_token(&self, refresh: &str) -> AppResult<String> {
        let claims = self.decode(refresh, TokenType::Refresh)?;
        let user = self.active_user(claims.user_id).await?;
        self.sign(TokenType::Access, &user)
    }

    /// Resolve an access token to the caller it was issued to
    pub async fn validate_bearer_token(&self, token: &str) -> AppResult<CallerIdentity> {
        let claims = self.decode(token, TokenType::Access)?;
        let user = self.active_user(claims.user_id).await?;
        Ok(CallerIdentity {
            user_id: user.id,
            username: user.username,
        })
    }

    /// Create the account unless the username is already taken.
    /// Returns `true` when a user was created.
    pub async fn ensure_user(&self, username: &str, password: &str) -> AppResult<bool> {
        if self.users.find_by_username(username).await?.is_some() {
            return Ok(false);
        }
        let hash = self.hash_password(password)?;
        let user = self.users.create(username, &hash).await?;
        tracing::info!(user_id = user.id, username, "Created user");
        Ok(true)
    }

    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn sign(&self, token_type: TokenType, user: &User) -> AppResult<String> {
        let lifetime = match token_type {
            TokenType::Access => Duration::minutes(self.config.access_token_minutes),
            TokenType::Refresh => Duration::hours(self.config.refresh_token_hours),
        };
        TokenClaims::new(token_type, user, lifetime)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn decode(&self, token: &str, expected: TokenType) -> AppResult<TokenClaims> {
        let claims = TokenClaims::from_token(token, &self.config.jwt_secret).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            AppError::Authentication(BAD_TOKEN.to_string())
        })?;
        if claims.token_type != expected {
            return Err(AppError::Authentication("Token has wrong type".to_string()));
        }
        Ok(claims)
    }

    async fn active_user(&self, user_id: i64) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::Authentication("User not found".to_string()))
    }
}
