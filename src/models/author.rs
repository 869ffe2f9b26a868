//! Author model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::book::Book;

/// Full author model from database.
///
/// `books` is loaded separately and populated on read; the books it contains
/// never carry their own `author` back reference.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    // Relation (loaded separately)
    #[sqlx(skip)]
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Author reference embedded in a book.
///
/// Deliberately has no `books` field so a book's author can never re-expand
/// its own book list in a response.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// Create author request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Update author request. The body id must match the path id.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthor {
    #[serde(default)]
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
