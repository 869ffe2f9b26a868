//! API integration tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_authors() {
    let client = Client::new();

    let response = client
        .get(format!("{}/authors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let authors = body.as_array().expect("Expected an array of authors");
    for author in authors {
        assert!(author["books"].is_array());
    }
}

#[tokio::test]
#[ignore]
async fn test_create_update_and_delete_author() {
    let client = Client::new();

    // Create author
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "firstName": "Ursula",
            "lastName": "Le Guin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let location = response
        .headers()
        .get("location")
        .expect("Missing Location header")
        .to_str()
        .expect("Invalid Location header")
        .to_string();

    let body: Value = response.json().await.expect("Failed to parse response");
    let author_id = body["id"].as_i64().expect("No author ID");
    assert_eq!(location, format!("/api/v1/authors/{}", author_id));

    // Update author (full replace of name fields)
    let response = client
        .put(format!("{}/authors/{}", BASE_URL, author_id))
        .json(&json!({
            "id": author_id,
            "firstName": "Ursula K.",
            "lastName": "Le Guin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    // Fetch and verify
    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["firstName"], "Ursula K.");

    // Delete author
    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    // Gone afterwards
    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_create_author_invalid_input() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "firstName": "   ",
            "lastName": "Doe"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_author_conflict() {
    let client = Client::new();

    let author = json!({
        "firstName": "Italo",
        "lastName": "Calvino"
    });

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&author)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let author_id = body["id"].as_i64().expect("No author ID");

    // Same name pair again
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&author)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Cleanup
    let _ = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_update_author_id_mismatch() {
    let client = Client::new();

    let response = client
        .put(format!("{}/authors/1", BASE_URL))
        .json(&json!({
            "id": 2,
            "firstName": "Herman",
            "lastName": "Melville"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let client = Client::new();

    // Create book against the seeded author
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "New Book",
            "description": "About something",
            "year": 2022,
            "authorId": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    assert!(response.headers().get("location").is_some());

    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["id"].as_i64().expect("No book ID");

    // Round trip
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "New Book");
    assert_eq!(body["year"], 2022);
    assert_eq!(body["authorId"], 1);
    // Embedded author resolved, without its own book list
    assert_eq!(body["author"]["firstName"], "Herman");
    assert!(body["author"].get("books").is_none());

    // Update
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({
            "id": book_id,
            "title": "New Book (2nd ed.)",
            "description": "About something",
            "year": 2023,
            "authorId": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    // Delete, then both fetch and a second delete report 404
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_create_book_invalid_input() {
    let client = Client::new();

    // Empty title
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "",
            "authorId": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Non-positive author id
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Orphan",
            "authorId": 0
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_list_books_has_no_author_cycle() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array of books");
    for book in books {
        assert!(book["author"].get("books").is_none());
    }
}
