//! Record store abstraction behind the book handlers.

mod memory;
mod postgres;

pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;

use async_trait::async_trait;
use serde_json::json;
use shelf_http::error::AppError;
use thiserror::Error;

use super::models::Book;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a book with isbn '{0}' already exists")]
    Duplicate(String),

    #[error("record store failure")]
    Backend(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(ref isbn) => AppError::conflict(
                vec![json!({ "field": "isbn", "error": "duplicate", "value": isbn })],
                err.to_string(),
            ),
            StoreError::Backend(source) => {
                AppError::Internal(anyhow::Error::new(source).context("record store failure"))
            }
        }
    }
}

/// Keyed storage for book records.
///
/// Every method is a single store operation; implementations are responsible
/// for isolation between concurrent writers.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new record. Fails with [`StoreError::Duplicate`] when the isbn
    /// is taken.
    async fn insert(&self, book: Book) -> Result<Book, StoreError>;

    /// All records ordered by title, then isbn.
    async fn select_all(&self) -> Result<Vec<Book>, StoreError>;

    async fn select_by_key(&self, isbn: &str) -> Result<Option<Book>, StoreError>;

    /// Replace every field of the record stored under `isbn`. The key never
    /// changes. `None` when nothing is stored under `isbn`.
    async fn update_by_key(&self, isbn: &str, book: Book) -> Result<Option<Book>, StoreError>;

    /// Returns whether a record was removed.
    async fn delete_by_key(&self, isbn: &str) -> Result<bool, StoreError>;
}
