//! Books service

use crate::{
    config::ValidationConfig,
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::{books::BookRecord, Repository},
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    validation: ValidationConfig,
}

impl BooksService {
    pub fn new(repository: Repository, validation: ValidationConfig) -> Self {
        Self {
            repository,
            validation,
        }
    }

    /// List all books with their author resolved
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get book by ID with its author resolved
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a book
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let record = self
            .validated_record(data.title.as_deref(), data.description.as_deref(), data.year, data.author_id)
            .await?;

        let book = self.repository.books.create(&record).await?;
        tracing::info!("Created book id={}", book.id);
        Ok(book)
    }

    /// Replace the mutable fields of a book
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<()> {
        if data.id != id {
            return Err(AppError::Validation(
                "Book id in path and body do not match".to_string(),
            ));
        }

        let record = self
            .validated_record(data.title.as_deref(), data.description.as_deref(), data.year, data.author_id)
            .await?;

        if !self.repository.books.exists(id).await? {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        self.repository.books.update(id, &record).await?;
        Ok(())
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let affected = self.repository.books.delete(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// Apply the configured validation rules to a book payload.
    ///
    /// Runs before any mutation is attempted. With `require_author_exists`
    /// disabled, a dangling `author_id` is left for the storage foreign-key
    /// constraint to reject.
    async fn validated_record<'a>(
        &self,
        title: Option<&'a str>,
        description: Option<&'a str>,
        year: Option<i32>,
        author_id: Option<i32>,
    ) -> AppResult<BookRecord<'a>> {
        let title = title.map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(AppError::Validation(
                "Book title cannot be empty".to_string(),
            ));
        }

        let author_id = author_id.unwrap_or(0);
        if author_id <= 0 {
            return Err(AppError::Validation(
                "Book authorId must be a positive integer".to_string(),
            ));
        }

        if self.validation.require_year && year.map_or(true, |y| y <= 0) {
            return Err(AppError::Validation(
                "Book year must be a positive integer".to_string(),
            ));
        }

        if self.validation.require_author_exists
            && !self.repository.authors.exists(author_id).await?
        {
            return Err(AppError::Validation(format!(
                "Author with id {} does not exist",
                author_id
            )));
        }

        Ok(BookRecord {
            title,
            description,
            year,
            author_id,
        })
    }
}
