//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::author::AuthorRef;

/// Full book model from database.
///
/// `author` is resolved on read when the book is the root of the response
/// and omitted from JSON when not populated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub author_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    // Relation (loaded separately)
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRef>,
}

/// Create book request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub title: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub author_id: Option<i32>,
}

/// Update book request. The body id must match the path id.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[serde(default)]
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub author_id: Option<i32>,
}
