//! PostgreSQL store tests
//!
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use bookshelf_server::{
    models::BookFields,
    repository::{BookStore, Repository, UserStore},
};
use sqlx::PgPool;

fn fields(title: &str, author: &str) -> BookFields {
    BookFields {
        title: title.to_string(),
        author: author.to_string(),
    }
}

#[sqlx::test]
#[ignore]
async fn test_create_then_get(pool: PgPool) {
    let repo = Repository::new(pool);

    let created = BookStore::create(&repo, &fields("Dune", "Herbert")).await.unwrap();
    let fetched = repo.get(created.id).await.unwrap().expect("book should exist");
    assert_eq!(fetched, created);
    assert_eq!(fetched.title, "Dune");
}

#[sqlx::test]
#[ignore]
async fn test_list_is_ordered_by_id(pool: PgPool) {
    let repo = Repository::new(pool);
    let a = BookStore::create(&repo, &fields("Dune", "Herbert")).await.unwrap();
    let b = BookStore::create(&repo, &fields("Emma", "Austen")).await.unwrap();

    let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[sqlx::test]
#[ignore]
async fn test_replace_and_delete(pool: PgPool) {
    let repo = Repository::new(pool);
    let book = BookStore::create(&repo, &fields("Dune", "Herbert")).await.unwrap();

    let replaced = repo
        .replace(book.id, &fields("Dune Messiah", "Frank Herbert"))
        .await
        .unwrap()
        .expect("book should exist");
    assert_eq!(replaced.id, book.id);
    assert_eq!(replaced.author, "Frank Herbert");

    assert!(repo.delete(book.id).await.unwrap());
    assert!(!repo.delete(book.id).await.unwrap());
    assert!(repo.get(book.id).await.unwrap().is_none());
    assert!(repo
        .replace(book.id, &fields("x", "y"))
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
#[ignore]
async fn test_users_lookup(pool: PgPool) {
    let repo = Repository::new(pool);

    let user = UserStore::create(&repo, "admin", "$argon2id$placeholder").await.unwrap();
    assert!(user.is_active);

    let by_name = repo.find_by_username("admin").await.unwrap().expect("user");
    assert_eq!(by_name.id, user.id);
    assert!(repo.find_by_id(user.id + 1000).await.unwrap().is_none());
    assert!(UserStore::create(&repo, "admin", "other").await.is_err());
}
