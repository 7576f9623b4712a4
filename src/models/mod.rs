//! Data models for Bookshelf

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookFields, BookPayload};
pub use user::{CallerIdentity, TokenClaims, TokenPair, TokenType, User};
