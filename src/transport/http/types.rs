use crate::app::book_store::{BookStore, StoreError};
use crate::domain::book::Book;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BookStore>,
}

/// `{"book": ...}` envelope for single-book responses.
#[derive(Serialize, Debug, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

/// `{"books": [...]}` envelope for the listing.
#[derive(Serialize, Debug, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<Book>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// JSON error envelope. `message` is the violation list for validation
/// failures and a single string otherwise; `status` mirrors the HTTP status.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    #[schema(value_type = Object)]
    pub message: JsonValue,
    pub status: u16,
}

/// Every failure a handler can produce, mapped deterministically to an HTTP
/// status and the error envelope. Store failures convert via `From` so the
/// handlers can use `?`.
#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<String>),
    NotFound(String),
    Conflict(String),
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Book not found".to_string()),
            StoreError::Conflict => {
                ApiError::Conflict("A book with this isbn already exists".to_string())
            }
            StoreError::Database(e) => {
                // Detail stays server-side; the client sees a generic 500.
                eprintln!("> Store error: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![format!("Invalid JSON body: {}", rejection)])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Validation(violations) => serde_json::json!(violations),
            ApiError::NotFound(msg) | ApiError::Conflict(msg) => serde_json::json!(msg),
            ApiError::Internal => serde_json::json!("Internal server error"),
        };
        (
            status,
            Json(ErrorResponse {
                message,
                status: status.as_u16(),
            }),
        )
            .into_response()
    }
}
