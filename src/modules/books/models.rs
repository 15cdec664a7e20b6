use serde::{Deserialize, Serialize};

/// A catalog entry. The isbn is the primary key and immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// Response wrapper for the whole collection.
#[derive(Debug, Serialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

/// Response wrapper for a single book.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub book: Book,
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
