use crate::domain::book::schema::{validate, ValidationResult};
use crate::domain::book::Book;
use crate::transport::http::types::{
    ApiError, AppState, BookListResponse, BookResponse, ErrorResponse, MessageResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;

/// Runs the schema gate, then decodes the payload into a typed record.
///
/// Decoding a payload the schema accepted cannot fail on field shape, so a
/// decode error here is a server bug and surfaces as a 500.
fn validated_book(payload: &JsonValue) -> Result<Book, ApiError> {
    match validate(payload) {
        ValidationResult::Invalid(violations) => Err(ApiError::Validation(violations)),
        ValidationResult::Valid => serde_json::from_value(payload.clone()).map_err(|e| {
            eprintln!("> Failed to decode validated payload: {}", e);
            ApiError::Internal
        }),
    }
}

#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "All stored books", body = BookListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_books_handler(
    State(state): State<AppState>,
) -> Result<Json<BookListResponse>, ApiError> {
    let books = state.store.list_all().await?;
    Ok(Json(BookListResponse { books }))
}

#[utoipa::path(
    get,
    path = "/books/{isbn}",
    params(
        ("isbn" = String, Path, description = "Book isbn")
    ),
    responses(
        (status = 200, description = "The requested book", body = BookResponse),
        (status = 404, description = "No book with this isbn", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state.store.get_by_isbn(&isbn).await?;
    Ok(Json(BookResponse { book }))
}

#[utoipa::path(
    post,
    path = "/books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created; the body echoes the submitted record", body = BookResponse),
        (status = 400, description = "Schema violations", body = ErrorResponse),
        (status = 409, description = "A book with this isbn already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_book_handler(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let Json(payload) = body?;
    // Validation runs strictly before any store mutation.
    let book = validated_book(&payload)?;
    let book = state.store.insert(&book).await?;
    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

#[utoipa::path(
    put,
    path = "/books/{isbn}",
    params(
        ("isbn" = String, Path, description = "Book isbn (the addressing key; the payload's isbn never renames the row)")
    ),
    request_body = Book,
    responses(
        (status = 200, description = "Book replaced; the body echoes the applied record", body = BookResponse),
        (status = 400, description = "Schema violations", body = ErrorResponse),
        (status = 404, description = "No book with this isbn", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let Json(payload) = body?;
    let book = validated_book(&payload)?;
    let book = state.store.replace(&isbn, &book).await?;
    Ok(Json(BookResponse { book }))
}

#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    params(
        ("isbn" = String, Path, description = "Book isbn")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "No book with this isbn", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_by_isbn(&isbn).await?;
    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}
