pub mod app;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::book_store::{BookStore, StoreError};
pub use domain::book::{validate, Book, ValidationResult};
