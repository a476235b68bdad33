//! End-to-end test: seed one book, then exercise every route against a live
//! Postgres through the in-process router.
//!
//! Requires `DATABASE_URL` (see `.env`); the `books` table is provisioned on
//! connect and cleared at the start of the run.

use book_api::transport;
use book_api::BookStore;
use serde_json::json;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_books_crud_flow() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    println!("--- test_books_crud_flow ---");

    let store = Arc::new(BookStore::connect().await?);

    // Start from a clean table, then seed one known book.
    sqlx::query("DELETE FROM books").execute(store.pool()).await?;
    let seed = json!({
        "isbn": "987654321",
        "amazon_url": "www.amazon.com",
        "author": "Test Author",
        "language": "test",
        "pages": 456,
        "publisher": "Test Publisher",
        "title": "Title",
        "year": 1900
    });
    sqlx::query(
        "INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind("987654321")
    .bind("www.amazon.com")
    .bind("Test Author")
    .bind("test")
    .bind(456_i32)
    .bind("Test Publisher")
    .bind("Title")
    .bind(1900_i32)
    .execute(store.pool())
    .await?;

    let app_state = transport::http::AppState {
        store: store.clone(),
    };
    let router = transport::http::create_router(app_state);

    // Bind to an ephemeral port to avoid conflicts if an API server is already running.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let base_url = format!("http://127.0.0.1:{}", port);
    let client = reqwest::Client::new();

    // --- GET /books returns the seeded book ---
    let resp = client.get(format!("{}/books", base_url)).send().await?;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body, json!({ "books": [seed] }));

    // --- POST /books echoes the submitted payload ---
    let new_book = json!({
        "isbn": "123456789",
        "amazon_url": "http://www.amazon.com/",
        "author": "Rey The Dogge",
        "language": "english",
        "pages": 123,
        "publisher": "Test Publisher",
        "title": "Test Title",
        "year": 2020
    });
    let resp = client
        .post(format!("{}/books", base_url))
        .json(&new_book)
        .send()
        .await?;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body, json!({ "book": new_book }));

    // Listing now contains both books ("123456789" sorts before "987654321").
    let body: serde_json::Value = client
        .get(format!("{}/books", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body, json!({ "books": [new_book, seed] }));

    // --- POST with a duplicate isbn is a conflict ---
    let resp = client
        .post(format!("{}/books", base_url))
        .json(&new_book)
        .send()
        .await?;
    assert_eq!(resp.status(), 409);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["status"], 409);

    // --- POST missing a property -> 400 with the violation named ---
    let mut missing_author = new_book.clone();
    missing_author.as_object_mut().unwrap().remove("author");
    let resp = client
        .post(format!("{}/books", base_url))
        .json(&missing_author)
        .send()
        .await?;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], json!(["author is required"]));

    // --- POST with a wrong-typed isbn -> 400 ---
    let mut numeric_isbn = new_book.clone();
    numeric_isbn["isbn"] = json!(111111111);
    let resp = client
        .post(format!("{}/books", base_url))
        .json(&numeric_isbn)
        .send()
        .await?;
    assert_eq!(resp.status(), 400);

    // Failed validations left the store untouched: still exactly two books.
    let body: serde_json::Value = client
        .get(format!("{}/books", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["books"].as_array().map(|b| b.len()), Some(2));

    // --- GET /books/:isbn ---
    let resp = client
        .get(format!("{}/books/987654321", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body, json!({ "book": seed }));

    let resp = client
        .get(format!("{}/books/000000000", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["status"], 404);

    // --- PUT replaces all fields and echoes the applied record ---
    let updated = json!({
        "isbn": "987654321",
        "amazon_url": "http://www.amazon.com/",
        "author": "Rey The Dogge",
        "language": "english",
        "pages": 123,
        "publisher": "Test Publisher",
        "title": "Test Title",
        "year": 2020
    });
    let resp = client
        .put(format!("{}/books/987654321", base_url))
        .json(&updated)
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body, json!({ "book": updated }));

    // --- PUT with wrong-typed fields -> 400, every failing field reported ---
    let mut bad_types = updated.clone();
    bad_types["pages"] = json!("123");
    bad_types["title"] = json!(false);
    let resp = client
        .put(format!("{}/books/987654321", base_url))
        .json(&bad_types)
        .send()
        .await?;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(
        body["message"],
        json!(["pages must be an integer", "title must be a string"])
    );

    // --- PUT on a missing isbn -> 404 and does not create a record ---
    let mut elsewhere = updated.clone();
    elsewhere["isbn"] = json!("000000000");
    let resp = client
        .put(format!("{}/books/000000000", base_url))
        .json(&elsewhere)
        .send()
        .await?;
    assert_eq!(resp.status(), 404);
    let resp = client
        .get(format!("{}/books/000000000", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);

    // --- DELETE, then GET yields 404 ---
    let resp = client
        .delete(format!("{}/books/987654321", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body, json!({ "message": "Book deleted" }));

    let resp = client
        .get(format!("{}/books/987654321", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{}/books/987654321", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);

    // --- /health pings the database ---
    let resp = client.get(format!("{}/health", base_url)).send().await?;
    assert_eq!(resp.status(), 200);

    // --- Shutdown ---
    server_handle.abort();
    store.close().await;

    Ok(())
}
