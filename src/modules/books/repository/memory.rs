use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookRepository, RepositoryError};
use crate::modules::books::models::Book;

/// In-memory book repository preserving insertion order.
///
/// Backs the end-to-end tests and local development without a database.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list_all(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.books.read().await.clone())
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, RepositoryError> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.isbn == isbn)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(isbn.to_string()))
    }

    async fn create(&self, book: Book) -> Result<Book, RepositoryError> {
        let mut books = self.books.write().await;

        // Mirrors the unique-constraint failure of the SQL backend.
        if books.iter().any(|existing| existing.isbn == book.isbn) {
            return Err(RepositoryError::Backend(format!(
                "duplicate isbn '{}'",
                book.isbn
            )));
        }

        books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, isbn: &str, book: Book) -> Result<Book, RepositoryError> {
        let mut books = self.books.write().await;

        let Some(slot) = books.iter_mut().find(|existing| existing.isbn == isbn) else {
            return Err(RepositoryError::NotFound(isbn.to_string()));
        };

        let replacement = Book {
            isbn: isbn.to_string(),
            ..book
        };
        *slot = replacement.clone();

        Ok(replacement)
    }

    async fn delete(&self, isbn: &str) -> Result<(), RepositoryError> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|book| book.isbn != isbn);

        if books.len() == before {
            return Err(RepositoryError::NotFound(isbn.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(isbn: &str) -> Book {
        Book {
            isbn: isbn.to_string(),
            amazon_url: "http://amazon.com".to_string(),
            author: "John Doe".to_string(),
            language: "english".to_string(),
            pages: 1000,
            publisher: "Test Books Publishing".to_string(),
            title: "Testing In Rust".to_string(),
            year: 2024,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let repo = InMemoryBookRepository::new();
        let book = sample("1122334455");

        repo.create(book.clone()).await.unwrap();
        let found = repo.get_by_isbn("1122334455").await.unwrap();

        assert_eq!(found, book);
    }

    #[tokio::test]
    async fn absent_isbn_signals_not_found_with_that_isbn() {
        let repo = InMemoryBookRepository::new();

        for result in [
            repo.get_by_isbn("1111111111").await.err(),
            repo.update("1111111111", sample("1111111111")).await.err(),
            repo.delete("1111111111").await.err(),
        ] {
            match result {
                Some(RepositoryError::NotFound(isbn)) => assert_eq!(isbn, "1111111111"),
                other => panic!("expected NotFound, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn not_found_message_names_the_isbn() {
        let repo = InMemoryBookRepository::new();
        let err = repo.get_by_isbn("1111111111").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "There is no book with an isbn '1111111111'"
        );
    }

    #[tokio::test]
    async fn list_all_preserves_insertion_order() {
        let repo = InMemoryBookRepository::new();
        assert!(repo.list_all().await.unwrap().is_empty());

        repo.create(sample("aaa")).await.unwrap();
        repo.create(sample("bbb")).await.unwrap();

        let books = repo.list_all().await.unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].isbn, "aaa");
        assert_eq!(books[1].isbn, "bbb");
    }

    #[tokio::test]
    async fn duplicate_create_is_a_backend_failure() {
        let repo = InMemoryBookRepository::new();
        repo.create(sample("1122334455")).await.unwrap();

        let err = repo.create(sample("1122334455")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Backend(_)));
    }

    #[tokio::test]
    async fn update_replaces_every_mutable_field() {
        let repo = InMemoryBookRepository::new();
        repo.create(sample("1122334455")).await.unwrap();

        let mut replacement = sample("1122334455");
        replacement.author = "Jane Doe".to_string();
        replacement.pages = 500;
        replacement.title = "Testing Routes In Rust".to_string();

        let updated = repo
            .update("1122334455", replacement.clone())
            .await
            .unwrap();
        assert_eq!(updated, replacement);
        assert_eq!(repo.get_by_isbn("1122334455").await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn update_never_rewrites_the_isbn() {
        let repo = InMemoryBookRepository::new();
        repo.create(sample("1122334455")).await.unwrap();

        // Body carries a different isbn; the targeted row keeps its key.
        let updated = repo
            .update("1122334455", sample("9999999999"))
            .await
            .unwrap();

        assert_eq!(updated.isbn, "1122334455");
        assert!(repo.get_by_isbn("9999999999").await.is_err());
    }

    #[tokio::test]
    async fn second_delete_signals_not_found() {
        let repo = InMemoryBookRepository::new();
        repo.create(sample("1122334455")).await.unwrap();

        repo.delete("1122334455").await.unwrap();
        let err = repo.delete("1122334455").await.unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
