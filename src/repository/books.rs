//! Books repository

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{author::AuthorRef, book::Book},
};

/// Persisted book fields, already validated by the service layer
pub struct BookRecord<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub year: Option<i32>,
    pub author_id: i32,
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all books with their author resolved.
    ///
    /// The embedded author is a reference shape only; its own book list is
    /// never expanded.
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let mut books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let authors =
            sqlx::query_as::<_, AuthorRef>("SELECT id, first_name, last_name FROM authors")
                .fetch_all(&self.pool)
                .await?;

        let by_id: HashMap<i32, AuthorRef> =
            authors.into_iter().map(|a| (a.id, a)).collect();
        for book in &mut books {
            book.author = by_id.get(&book.author_id).cloned();
        }

        Ok(books)
    }

    /// Get book by ID with its author resolved
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let mut book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        book.author = sqlx::query_as::<_, AuthorRef>(
            "SELECT id, first_name, last_name FROM authors WHERE id = ?",
        )
        .bind(book.author_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Check if a book with the given ID exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Create a new book.
    ///
    /// A dangling `author_id` is rejected here by the foreign-key constraint
    /// when the service layer did not verify it first.
    pub async fn create(&self, record: &BookRecord<'_>) -> AppResult<Book> {
        let now = Utc::now();
        let mut book = sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, description, year, author_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(record.title)
        .bind(record.description)
        .bind(record.year)
        .bind(record.author_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        book.author = sqlx::query_as::<_, AuthorRef>(
            "SELECT id, first_name, last_name FROM authors WHERE id = ?",
        )
        .bind(book.author_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Overwrite the mutable fields of a book, returning the affected row count
    pub async fn update(&self, id: i32, record: &BookRecord<'_>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE books SET title = ?, description = ?, year = ?, author_id = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(record.title)
        .bind(record.description)
        .bind(record.year)
        .bind(record.author_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a book, returning the affected row count
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
