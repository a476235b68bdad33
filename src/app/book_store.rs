//! The Book Store Adapter.
//!
//! This module is the boundary between the route handlers and PostgreSQL.
//! It wraps the connection pool with the five operations the HTTP layer
//! needs; all mutable state lives in the database, and the adapter holds
//! nothing across requests beyond the pool itself.

use crate::domain::book::Book;
use crate::infra::config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

/// Postgres SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("book not found")]
    NotFound,
    #[error("a book with this isbn already exists")]
    Conflict,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

const BOOK_COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

/// Wraps the database pool with the books-relation operations.
pub struct BookStore {
    pool: PgPool,
}

impl BookStore {
    /// Opens the connection pool and provisions the `books` table.
    pub async fn connect() -> Result<Self, anyhow::Error> {
        dotenv::dotenv().ok();
        let database_url = config::database_url();

        let pool = PgPoolOptions::new()
            .max_connections(config::max_db_connections())
            .connect(&database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS books (
                isbn       TEXT PRIMARY KEY,
                amazon_url TEXT NOT NULL,
                author     TEXT NOT NULL,
                language   TEXT NOT NULL,
                pages      INTEGER NOT NULL,
                publisher  TEXT NOT NULL,
                title      TEXT NOT NULL,
                year       INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Closes the pool; pending connections finish their work first.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Returns every stored book, ordered by isbn so listings are stable.
    pub async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        let sql = format!("SELECT {} FROM books ORDER BY isbn", BOOK_COLUMNS);
        let books = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(books)
    }

    pub async fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError> {
        let sql = format!("SELECT {} FROM books WHERE isbn = $1", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&sql)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Inserts a new book; a duplicate isbn surfaces as `Conflict`.
    pub async fn insert(&self, book: &Book) -> Result<Book, StoreError> {
        let sql = format!(
            "INSERT INTO books ({cols}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {cols}",
            cols = BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(&book.isbn)
            .bind(&book.amazon_url)
            .bind(&book.author)
            .bind(&book.language)
            .bind(book.pages)
            .bind(&book.publisher)
            .bind(&book.title)
            .bind(book.year)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                    StoreError::Conflict
                }
                _ => StoreError::Database(e),
            })
    }

    /// Fully overwrites the record addressed by `isbn`.
    ///
    /// The key is the path parameter, not the payload's isbn field; the row
    /// is never renamed.
    pub async fn replace(&self, isbn: &str, book: &Book) -> Result<Book, StoreError> {
        let sql = format!(
            "UPDATE books \
             SET amazon_url = $2, author = $3, language = $4, pages = $5, \
                 publisher = $6, title = $7, year = $8 \
             WHERE isbn = $1 \
             RETURNING {}",
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(isbn)
            .bind(&book.amazon_url)
            .bind(&book.author)
            .bind(&book.language)
            .bind(book.pages)
            .bind(&book.publisher)
            .bind(&book.title)
            .bind(book.year)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    pub async fn delete_by_isbn(&self, isbn: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
