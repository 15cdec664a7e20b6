use std::sync::Arc;

use async_trait::async_trait;
use tokio_postgres::{Client, Row};

use super::{BookRepository, RepositoryError};
use crate::modules::books::models::Book;

/// Postgres-backed book repository.
///
/// Holds a shared client injected at construction; never reaches for a
/// global connection.
pub struct PgBookRepository {
    client: Arc<Client>,
}

impl PgBookRepository {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

fn book_from_row(row: &Row) -> Book {
    Book {
        isbn: row.get("isbn"),
        amazon_url: row.get("amazon_url"),
        author: row.get("author"),
        language: row.get("language"),
        pages: row.get("pages"),
        publisher: row.get("publisher"),
        title: row.get("title"),
        year: row.get("year"),
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list_all(&self) -> Result<Vec<Book>, RepositoryError> {
        let rows = self
            .client
            .query(
                "SELECT isbn, amazon_url, author, language, pages, publisher, title, year
                 FROM books",
                &[],
            )
            .await?;

        Ok(rows.iter().map(book_from_row).collect())
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, RepositoryError> {
        let row = self
            .client
            .query_opt(
                "SELECT isbn, amazon_url, author, language, pages, publisher, title, year
                 FROM books
                 WHERE isbn = $1",
                &[&isbn],
            )
            .await?;

        row.map(|row| book_from_row(&row))
            .ok_or_else(|| RepositoryError::NotFound(isbn.to_string()))
    }

    async fn create(&self, book: Book) -> Result<Book, RepositoryError> {
        self.client
            .execute(
                "INSERT INTO books
                     (isbn, amazon_url, author, language, pages, publisher, title, year)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                &[
                    &book.isbn,
                    &book.amazon_url,
                    &book.author,
                    &book.language,
                    &book.pages,
                    &book.publisher,
                    &book.title,
                    &book.year,
                ],
            )
            .await?;

        Ok(book)
    }

    async fn update(&self, isbn: &str, book: Book) -> Result<Book, RepositoryError> {
        // Single conditional statement: zero rows affected means the
        // target does not exist and nothing was written.
        let updated = self
            .client
            .execute(
                "UPDATE books
                 SET amazon_url = $2,
                     author = $3,
                     language = $4,
                     pages = $5,
                     publisher = $6,
                     title = $7,
                     year = $8
                 WHERE isbn = $1",
                &[
                    &isbn,
                    &book.amazon_url,
                    &book.author,
                    &book.language,
                    &book.pages,
                    &book.publisher,
                    &book.title,
                    &book.year,
                ],
            )
            .await?;

        if updated == 0 {
            return Err(RepositoryError::NotFound(isbn.to_string()));
        }

        Ok(Book {
            isbn: isbn.to_string(),
            ..book
        })
    }

    async fn delete(&self, isbn: &str) -> Result<(), RepositoryError> {
        let deleted = self
            .client
            .execute("DELETE FROM books WHERE isbn = $1", &[&isbn])
            .await?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound(isbn.to_string()));
        }

        Ok(())
    }
}
