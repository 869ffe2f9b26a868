//! Authors repository

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{author::Author, book::Book},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Sqlite>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all authors with their books populated
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let mut authors = sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        // Group once instead of one query per author
        let mut by_author: HashMap<i32, Vec<Book>> = HashMap::new();
        for book in books {
            by_author.entry(book.author_id).or_default().push(book);
        }
        for author in &mut authors {
            author.books = by_author.remove(&author.id).unwrap_or_default();
        }

        Ok(authors)
    }

    /// Get author by ID with books populated
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        let mut author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;

        author.books =
            sqlx::query_as::<_, Book>("SELECT * FROM books WHERE author_id = ? ORDER BY id")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        Ok(author)
    }

    /// Check if an author with the given ID exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Check if an author with the exact name pair already exists
    pub async fn name_exists(&self, first_name: &str, last_name: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM authors WHERE first_name = ? AND last_name = ?)",
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a new author
    pub async fn create(&self, first_name: &str, last_name: &str) -> AppResult<Author> {
        let now = Utc::now();
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (first_name, last_name, created_at, updated_at) \
             VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    /// Overwrite the name fields of an author, returning the affected row count
    pub async fn update(&self, id: i32, first_name: &str, last_name: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE authors SET first_name = ?, last_name = ?, updated_at = ? WHERE id = ?",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete an author, returning the affected row count
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
