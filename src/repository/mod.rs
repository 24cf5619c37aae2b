//! Repository layer for database operations.
//!
//! `CatalogStore` is the persistence contract the handlers consume; handlers
//! receive it through `AppState` rather than as an ambient global. `PgCatalog`
//! is the PostgreSQL implementation.

mod pg;

pub use pg::PgCatalog;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::book::{Book, BookSummary};
use crate::models::book_instance::{BookInstance, BookInstanceDetail, NewBookInstance};
use crate::models::genre::{Genre, NewGenre};

/// Catalog persistence operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All copies with their book reference resolved.
    async fn book_instances(&self) -> AppResult<Vec<BookInstanceDetail>>;

    /// One copy with its book reference resolved.
    async fn book_instance_detail(&self, id: i64) -> AppResult<Option<BookInstanceDetail>>;

    /// One copy as stored.
    async fn book_instance(&self, id: i64) -> AppResult<Option<BookInstance>>;

    async fn create_book_instance(&self, copy: &NewBookInstance) -> AppResult<BookInstance>;

    /// Full-field replace, identity preserved. `None` when no copy has this id.
    async fn update_book_instance(
        &self,
        id: i64,
        copy: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>>;

    /// `false` when no copy had this id.
    async fn delete_book_instance(&self, id: i64) -> AppResult<bool>;

    /// All genres, name ascending.
    async fn genres(&self) -> AppResult<Vec<Genre>>;

    async fn genre(&self, id: i64) -> AppResult<Option<Genre>>;

    /// Exact-name lookup backing the duplicate pre-check at creation.
    async fn genre_by_name(&self, name: &str) -> AppResult<Option<Genre>>;

    async fn create_genre(&self, genre: &NewGenre) -> AppResult<Genre>;

    /// `None` when no genre has this id.
    async fn update_genre(&self, id: i64, genre: &NewGenre) -> AppResult<Option<Genre>>;

    /// `false` when no genre had this id.
    async fn delete_genre(&self, id: i64) -> AppResult<bool>;

    /// id + title projection for form select controls, title ascending.
    async fn books(&self) -> AppResult<Vec<BookSummary>>;

    /// Books whose genre set includes the given genre.
    async fn books_by_genre(&self, genre_id: i64) -> AppResult<Vec<Book>>;
}
