//! Business logic services

pub mod authors;
pub mod books;

use crate::{config::ValidationConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, validation: ValidationConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository, validation),
        }
    }
}
