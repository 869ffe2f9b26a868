//! Authors service

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor, UpdateAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all authors with their books
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Get author by ID with their books
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Create an author.
    ///
    /// The name pair must be unique; uniqueness lives here, not in the schema.
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let (first_name, last_name) =
            validated_names(data.first_name.as_deref(), data.last_name.as_deref())?;

        if self
            .repository
            .authors
            .name_exists(first_name, last_name)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Author \"{} {}\" already exists",
                first_name, last_name
            )));
        }

        let author = self.repository.authors.create(first_name, last_name).await?;
        tracing::info!("Created author id={}", author.id);
        Ok(author)
    }

    /// Replace an author's name fields.
    ///
    /// An update that affects no rows is re-checked against the current state:
    /// row gone means NotFound, row still present means a write conflict that
    /// is not recoverable here.
    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<()> {
        if data.id != id {
            return Err(AppError::Validation(
                "Author id in path and body do not match".to_string(),
            ));
        }

        let (first_name, last_name) =
            validated_names(data.first_name.as_deref(), data.last_name.as_deref())?;

        let affected = self
            .repository
            .authors
            .update(id, first_name, last_name)
            .await?;
        if affected == 0 {
            if self.repository.authors.exists(id).await? {
                return Err(AppError::Internal(format!(
                    "Concurrent update conflict on author {}",
                    id
                )));
            }
            return Err(AppError::NotFound(format!(
                "Author with id {} not found",
                id
            )));
        }

        Ok(())
    }

    /// Delete an author
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let affected = self.repository.authors.delete(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!(
                "Author with id {} not found",
                id
            )));
        }
        tracing::info!("Deleted author id={}", id);
        Ok(())
    }
}

/// Reject missing, empty or whitespace-only name fields; returns trimmed names
fn validated_names<'a>(
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
) -> AppResult<(&'a str, &'a str)> {
    let first_name = first_name.map(str::trim).unwrap_or_default();
    if first_name.is_empty() {
        return Err(AppError::Validation(
            "Author first name cannot be empty".to_string(),
        ));
    }
    let last_name = last_name.map(str::trim).unwrap_or_default();
    if last_name.is_empty() {
        return Err(AppError::Validation(
            "Author last name cannot be empty".to_string(),
        ));
    }
    Ok((first_name, last_name))
}
