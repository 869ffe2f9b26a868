//! Authors API endpoints

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    Json,
};

use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor, UpdateAuthor},
};

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Authors list with their books", body = Vec<Author>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details with books", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(author))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Author with this name already exists")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAuthor>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<Author>)> {
    let author = state.services.authors.create(&data).await?;
    let location = [(
        header::LOCATION,
        format!("/api/v1/authors/{}", author.id),
    )];
    Ok((StatusCode::CREATED, location, Json(author)))
}

/// Update an author (full replace of name fields)
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 204, description = "Author updated"),
        (status = 400, description = "Invalid input or id mismatch"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAuthor>,
) -> AppResult<StatusCode> {
    state.services.authors.update(id, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
