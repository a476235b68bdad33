use crate::domain::book::Book;
use crate::transport::http::handlers::{books, health};
use crate::transport::http::types::{
    AppState, BookListResponse, BookResponse, ErrorResponse, MessageResponse,
};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        books::list_books_handler,
        books::get_book_handler,
        books::create_book_handler,
        books::update_book_handler,
        books::delete_book_handler
    ),
    components(schemas(
        Book,
        BookResponse,
        BookListResponse,
        MessageResponse,
        ErrorResponse
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

/// The static dispatch table: method + path pattern -> handler.
///
/// `:isbn` is extracted as an opaque string and passed through unmodified.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/books",
            get(books::list_books_handler).post(books::create_book_handler),
        )
        .route(
            "/books/:isbn",
            get(books::get_book_handler)
                .put(books::update_book_handler)
                .delete(books::delete_book_handler),
        )
        .with_state(app_state)
}
