//! Book model (read-only within this application).
//!
//! Books are authored elsewhere; the catalog handlers only resolve copy
//! references against them and list them in form select controls.

use sqlx::FromRow;

/// Full book record, as the genre pages show it.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub summary: String,
}

/// id + title projection for form select controls.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
}
