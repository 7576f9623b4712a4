//! In-process store used for `memory://` database URLs and tests

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BookStore, UserStore};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFields, User},
};

#[derive(Default)]
struct Tables {
    books: BTreeMap<i64, Book>,
    last_book_id: i64,
    users: BTreeMap<i64, User>,
    last_user_id: i64,
}

/// Both stores over shared tables; clones see the same data.
/// Ids are never reused, even after deletion.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(tables.books.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> AppResult<Option<Book>> {
        let tables = self.tables.read().await;
        Ok(tables.books.get(&id).cloned())
    }

    async fn create(&self, fields: &BookFields) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        tables.last_book_id += 1;
        let book = Book::new(tables.last_book_id, fields.clone());
        tables.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn replace(&self, id: i64, fields: &BookFields) -> AppResult<Option<Book>> {
        let mut tables = self.tables.write().await;
        Ok(tables.books.get_mut(&id).map(|book| {
            *book = Book::new(id, fields.clone());
            book.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.books.remove(&id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == username) {
            return Err(AppError::Internal(format!(
                "username {} already exists",
                username
            )));
        }
        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}
