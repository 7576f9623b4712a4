//! Business logic services

pub mod auth;
pub mod books;

use std::sync::Arc;

use crate::{
    config::AuthConfig,
    repository::{BookStore, UserStore},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
}

impl Services {
    /// Create all services over the given stores
    pub fn new(books: Arc<dyn BookStore>, users: Arc<dyn UserStore>, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(users, auth_config),
            books: books::BooksService::new(books),
        }
    }
}
