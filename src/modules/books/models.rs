use serde::{Deserialize, Serialize};
use validator::Validate;

/// A book record, keyed by its ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, sqlx::FromRow)]
#[serde(deny_unknown_fields)]
pub struct Book {
    /// Unique identifier for the book
    #[validate(length(min = 1))]
    pub isbn: String,
    /// Link to the book's Amazon listing
    #[validate(url)]
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    /// Page count, always positive
    #[validate(range(min = 1))]
    pub pages: i32,
    pub publisher: String,
    /// Title of the book
    #[validate(length(min = 1))]
    pub title: String,
    /// Publication year
    pub year: i32,
}

/// `{"book": {...}}` envelope returned by single-record endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResponse {
    pub book: Book,
}

/// `{"books": [...]}` envelope returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookListResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
