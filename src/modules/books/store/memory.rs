use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, StoreError};
use crate::modules::books::models::Book;

/// In-process store, used for local runs and tests.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<BTreeMap<String, Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store that already holds `books`.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let books = books
            .into_iter()
            .map(|book| (book.isbn.clone(), book))
            .collect();
        Self {
            books: RwLock::new(books),
        }
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, book: Book) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.isbn) {
            return Err(StoreError::Duplicate(book.isbn));
        }
        books.insert(book.isbn.clone(), book.clone());
        Ok(book)
    }

    async fn select_all(&self) -> Result<Vec<Book>, StoreError> {
        let mut books: Vec<Book> = self.books.read().await.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.isbn.cmp(&b.isbn)));
        Ok(books)
    }

    async fn select_by_key(&self, isbn: &str) -> Result<Option<Book>, StoreError> {
        Ok(self.books.read().await.get(isbn).cloned())
    }

    async fn update_by_key(&self, isbn: &str, book: Book) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write().await;
        let Some(stored) = books.get_mut(isbn) else {
            return Ok(None);
        };
        *stored = Book {
            isbn: isbn.to_string(),
            ..book
        };
        Ok(Some(stored.clone()))
    }

    async fn delete_by_key(&self, isbn: &str) -> Result<bool, StoreError> {
        Ok(self.books.write().await.remove(isbn).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(isbn: &str, title: &str) -> Book {
        Book {
            isbn: isbn.to_string(),
            amazon_url: "https://amazon.com/taco".to_string(),
            author: "Elie".to_string(),
            language: "English".to_string(),
            pages: 100,
            publisher: "Nothing publishers".to_string(),
            title: title.to_string(),
            year: 2008,
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_isbn() {
        let store = MemoryBookStore::new();
        store.insert(book("1", "a")).await.unwrap();

        let err = store.insert(book("1", "b")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(isbn) if isbn == "1"));
        assert_eq!(store.select_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn select_all_orders_by_title_then_isbn() {
        let store = MemoryBookStore::with_books([book("3", "beta"), book("2", "alpha"), book("1", "beta")]);

        let isbns: Vec<_> = store
            .select_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.isbn)
            .collect();
        assert_eq!(isbns, vec!["2", "1", "3"]);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = MemoryBookStore::new();
        assert!(store.select_all().await.unwrap().is_empty());
        assert!(store.select_by_key("999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_record_in_place() {
        let store = MemoryBookStore::with_books([book("1", "old"), book("2", "two")]);

        let updated = store.update_by_key("1", book("1", "new")).await.unwrap();
        assert_eq!(updated.unwrap().title, "new");
        assert_eq!(store.select_by_key("1").await.unwrap().unwrap().title, "new");
        assert_eq!(store.select_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_missing_record_returns_none() {
        let store = MemoryBookStore::new();
        assert!(store.update_by_key("1", book("1", "x")).await.unwrap().is_none());
        assert!(store.select_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_never_moves_the_key() {
        let store = MemoryBookStore::with_books([book("1", "one"), book("2", "two")]);

        let updated = store.update_by_key("1", book("2", "clash")).await.unwrap().unwrap();
        assert_eq!(updated.isbn, "1");
        assert_eq!(store.select_by_key("1").await.unwrap().unwrap().title, "clash");
        assert_eq!(store.select_by_key("2").await.unwrap().unwrap().title, "two");
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let store = MemoryBookStore::with_books([book("1", "one")]);
        assert!(store.delete_by_key("1").await.unwrap());
        assert!(!store.delete_by_key("1").await.unwrap());
    }
}
