//! Book catalog service

use std::sync::Arc;

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPayload},
    repository::BookStore,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.store.list().await
    }

    /// Resolve an id to its record; shared by retrieve, replace and delete
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        match self.store.get(id).await? {
            Some(book) => Ok(book),
            None => Err(not_found(id)),
        }
    }

    pub async fn create(&self, body: Value) -> AppResult<Book> {
        let fields = BookPayload::parse(body)?;
        let book = self.store.create(&fields).await?;
        tracing::info!(book_id = book.id, "Created book");
        Ok(book)
    }

    /// Full replace. The id is resolved before the body is validated, and an
    /// invalid body leaves the stored record untouched.
    pub async fn replace(&self, id: i64, body: Value) -> AppResult<Book> {
        self.get_by_id(id).await?;
        let fields = BookPayload::parse(body)?;
        let book = self
            .store
            .replace(id, &fields)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(book_id = id, "Replaced book");
        Ok(book)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(book_id = id, "Deleted book");
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockBookStore;
    use mockall::predicate::eq;
    use serde_json::json;

    fn dune() -> Book {
        Book {
            id: 1,
            title: "Dune".into(),
            author: "Herbert".into(),
        }
    }

    #[tokio::test]
    async fn replace_of_unknown_id_skips_validation() {
        let mut store = MockBookStore::new();
        store.expect_get().with(eq(9)).returning(|_| Ok(None));
        store.expect_replace().never();
        let service = BooksService::new(Arc::new(store));

        // The body is invalid too, but not-found wins.
        let result = service.replace(9, json!({"title": ""})).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn invalid_replace_does_not_touch_the_store() {
        let mut store = MockBookStore::new();
        store.expect_get().returning(|_| Ok(Some(dune())));
        store.expect_replace().never();
        let service = BooksService::new(Arc::new(store));

        let result = service.replace(1, json!({"title": "Dune Messiah"})).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn invalid_create_does_not_touch_the_store() {
        let mut store = MockBookStore::new();
        store.expect_create().never();
        let service = BooksService::new(Arc::new(store));

        let result = service.create(json!({"author": "Herbert"})).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn replace_reports_not_found_if_row_vanished() {
        let mut store = MockBookStore::new();
        store.expect_get().returning(|_| Ok(Some(dune())));
        store.expect_replace().returning(|_, _| Ok(None));
        let service = BooksService::new(Arc::new(store));

        let result = service
            .replace(1, json!({"title": "Dune", "author": "Frank Herbert"}))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_not_found() {
        let mut store = MockBookStore::new();
        store.expect_delete().with(eq(5)).returning(|_| Ok(false));
        let service = BooksService::new(Arc::new(store));

        assert!(matches!(service.delete(5).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let mut store = MockBookStore::new();
        store
            .expect_list()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        let service = BooksService::new(Arc::new(store));

        assert!(matches!(service.list().await, Err(AppError::Database(_))));
    }
}
