//! Bookshelf Server
//!
//! A REST JSON API for managing a catalog of books, guarded by JWT
//! bearer tokens.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::{BookStore, UserStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, books: Arc<dyn BookStore>, users: Arc<dyn UserStore>) -> Self {
        let services = services::Services::new(books, users, config.auth.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
