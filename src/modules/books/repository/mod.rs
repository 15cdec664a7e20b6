//! Book persistence contracts and backends.

mod memory;
mod postgres;

pub use memory::InMemoryBookRepository;
pub use postgres::PgBookRepository;

use async_trait::async_trait;

use super::models::Book;

/// Failures surfaced by book persistence operations.
///
/// `NotFound` is the only business-level failure; storage faults pass
/// through unclassified.
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("There is no book with an isbn '{0}'")]
    NotFound(String),

    #[error("database failure: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("{0}")]
    Backend(String),
}

/// Persistence operations for the book table.
///
/// Each operation issues exactly one logical statement against the store
/// and relies on the store's own single-statement atomicity.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Every stored book; storage-default ordering.
    async fn list_all(&self) -> Result<Vec<Book>, RepositoryError>;

    /// Exact-match lookup by isbn.
    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, RepositoryError>;

    /// Insert a complete record. A duplicate isbn surfaces as the store's
    /// unique-constraint failure, not as a special case.
    async fn create(&self, book: Book) -> Result<Book, RepositoryError>;

    /// Replace all mutable fields of the row matching `isbn`. The isbn
    /// column itself is never rewritten.
    async fn update(&self, isbn: &str, book: Book) -> Result<Book, RepositoryError>;

    /// Remove the row matching `isbn`.
    async fn delete(&self, isbn: &str) -> Result<(), RepositoryError>;
}
