//! Domain model for the books resource.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod schema;

pub use schema::{validate, ValidationResult};

/// The single persisted entity, uniquely keyed by `isbn`.
///
/// The key is immutable once a record exists; updates address the record by
/// its current isbn and only overwrite the other fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}
