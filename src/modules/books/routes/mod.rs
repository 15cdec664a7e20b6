//! HTTP handlers for the books module.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use libris_http::ApiError;

use super::models::{Book, BookResponse, BooksResponse, MessageResponse};
use super::repository::{BookRepository, RepositoryError};
use super::schema::SchemaValidator;

/// Shared handler state: the repository and the compiled schema validator.
#[derive(Clone)]
pub struct BooksState {
    pub repo: Arc<dyn BookRepository>,
    pub validator: Arc<SchemaValidator>,
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => ApiError::not_found(err.to_string()),
            other => ApiError::Internal(anyhow::Error::new(other)),
        }
    }
}

/// GET / — list every book
pub async fn list_books(
    State(state): State<BooksState>,
) -> Result<Json<BooksResponse>, ApiError> {
    let books = state.repo.list_all().await?;
    Ok(Json(BooksResponse { books }))
}

/// GET /{isbn} — fetch one book
pub async fn get_book(
    State(state): State<BooksState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state.repo.get_by_isbn(&isbn).await?;
    Ok(Json(BookResponse { book }))
}

/// POST / — create a book from a schema-checked body
pub async fn create_book(
    State(state): State<BooksState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = validated_book(&state.validator, payload)?;
    let book = state.repo.create(book).await?;
    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

/// PUT /{isbn} — full replacement of a book
pub async fn update_book(
    State(state): State<BooksState>,
    Path(isbn): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = validated_book(&state.validator, payload)?;
    // The path parameter names the target row; a body isbn is never
    // persisted.
    let book = state.repo.update(&isbn, book).await?;
    Ok(Json(BookResponse { book }))
}

/// DELETE /{isbn} — remove a book
pub async fn delete_book(
    State(state): State<BooksState>,
    Path(isbn): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.repo.delete(&isbn).await?;
    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}

/// Run the schema check, then deserialize the vetted payload.
///
/// The repository is never reached when the check fails.
fn validated_book(validator: &SchemaValidator, payload: Value) -> Result<Book, ApiError> {
    let check = validator.check(&payload);
    if !check.valid {
        return Err(ApiError::validation(check.violations));
    }

    let book = serde_json::from_value(payload).map_err(anyhow::Error::from)?;
    Ok(book)
}
