//! PostgreSQL catalog store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::AppResult;
use crate::models::book::{Book, BookSummary};
use crate::models::book_instance::{BookInstance, BookInstanceDetail, NewBookInstance};
use crate::models::genre::{Genre, NewGenre};

use super::CatalogStore;

/// Catalog store backed by a PostgreSQL connection pool. Reference resolution
/// ("populate") is a join against `books`.
#[derive(Clone)]
pub struct PgCatalog {
    pool: Pool<Postgres>,
}

impl PgCatalog {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalog {
    async fn book_instances(&self) -> AppResult<Vec<BookInstanceDetail>> {
        let copies = sqlx::query_as::<_, BookInstanceDetail>(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back,
                   b.title AS book_title
            FROM book_instances bi
            JOIN books b ON b.id = bi.book_id
            ORDER BY bi.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(copies)
    }

    async fn book_instance_detail(&self, id: i64) -> AppResult<Option<BookInstanceDetail>> {
        let copy = sqlx::query_as::<_, BookInstanceDetail>(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back,
                   b.title AS book_title
            FROM book_instances bi
            JOIN books b ON b.id = bi.book_id
            WHERE bi.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(copy)
    }

    async fn book_instance(&self, id: i64) -> AppResult<Option<BookInstance>> {
        let copy = sqlx::query_as::<_, BookInstance>(
            "SELECT id, book_id, imprint, status, due_back FROM book_instances WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(copy)
    }

    async fn create_book_instance(&self, copy: &NewBookInstance) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(copy.book_id)
        .bind(&copy.imprint)
        .bind(copy.status.as_str())
        .bind(copy.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_book_instance(
        &self,
        id: i64,
        copy: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = $1, imprint = $2, status = $3, due_back = $4
            WHERE id = $5
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(copy.book_id)
        .bind(&copy.imprint)
        .bind(copy.status.as_str())
        .bind(copy.due_back)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_book_instance(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    async fn genre(&self, id: i64) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(genre)
    }

    async fn genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(genre)
    }

    async fn create_genre(&self, genre: &NewGenre) -> AppResult<Genre> {
        let row =
            sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES ($1) RETURNING id, name")
                .bind(&genre.name)
                .fetch_one(&self.pool)
                .await?;
        Ok(row)
    }

    async fn update_genre(&self, id: i64, genre: &NewGenre) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(&genre.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_genre(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn books(&self) -> AppResult<Vec<BookSummary>> {
        let books =
            sqlx::query_as::<_, BookSummary>("SELECT id, title FROM books ORDER BY title")
                .fetch_all(&self.pool)
                .await?;
        Ok(books)
    }

    async fn books_by_genre(&self, genre_id: i64) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.id, b.title, b.summary
            FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = $1
            ORDER BY b.title
            "#,
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }
}
