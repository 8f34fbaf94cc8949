//! HTTP handlers for the book resource.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use shelf_http::error::AppError;

use super::models::{BookListResponse, BookResponse, MessageResponse};
use super::store::BookStore;
use super::validation::BookPayload;

pub type SharedStore = Arc<dyn BookStore>;

/// Routes relative to the module mount point.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{isbn}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
}

fn not_found(isbn: &str) -> AppError {
    AppError::not_found(format!("There is no book with an isbn '{isbn}'"))
}

async fn create_book(
    State(store): State<SharedStore>,
    BookPayload(book): BookPayload,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    let book = store.insert(book).await?;
    tracing::info!(isbn = %book.isbn, "book created");
    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

async fn list_books(State(store): State<SharedStore>) -> Result<Json<BookListResponse>, AppError> {
    let books = store.select_all().await?;
    Ok(Json(BookListResponse { books }))
}

async fn get_book(
    State(store): State<SharedStore>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, AppError> {
    let book = store
        .select_by_key(&isbn)
        .await?
        .ok_or_else(|| not_found(&isbn))?;
    Ok(Json(BookResponse { book }))
}

/// Full replacement of the record addressed by the path. The payload is
/// validated by the extractor before the store is touched, and its isbn must
/// match the path.
async fn update_book(
    State(store): State<SharedStore>,
    Path(isbn): Path<String>,
    BookPayload(book): BookPayload,
) -> Result<Json<BookResponse>, AppError> {
    if book.isbn != isbn {
        return Err(AppError::validation(
            vec![json!({ "field": "isbn", "error": "immutable" })],
            format!("isbn '{}' does not match the addressed book '{isbn}'", book.isbn),
        ));
    }
    let book = store
        .update_by_key(&isbn, book)
        .await?
        .ok_or_else(|| not_found(&isbn))?;
    tracing::info!(isbn = %book.isbn, "book updated");
    Ok(Json(BookResponse { book }))
}

async fn delete_book(
    State(store): State<SharedStore>,
    Path(isbn): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !store.delete_by_key(&isbn).await? {
        return Err(not_found(&isbn));
    }
    tracing::info!(isbn = %isbn, "book deleted");
    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}
