//! Book copy handlers: list, detail, create, delete, update.
//!
//! Copies are deleted unconditionally; there is no referential guard for
//! this entity. Validation failures re-render the form at HTTP 200 with the
//! entered values, mutations redirect to the copy's canonical URL.

use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    forms::FormErrors,
    models::book_instance::{BookInstanceForm, NewBookInstance},
    views, AppState,
};

/// Display list of all copies, each with its book resolved.
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let copies = state.store.book_instances().await?;
    Ok(views::bookinstance_list(&copies))
}

/// Display detail page for a specific copy.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let copy = state
        .store
        .book_instance_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
    Ok(views::bookinstance_detail(&copy))
}

/// Display copy create form with the book selection.
pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.store.books().await?;
    Ok(views::bookinstance_form(
        "Create Book Instance",
        &books,
        None,
        &FormErrors::default(),
    ))
}

/// Handle copy create on POST.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match form.validated() {
        Ok(new_copy) => {
            let copy = state.store.create_book_instance(&new_copy).await?;
            Ok(Redirect::to(&copy.url()).into_response())
        }
        Err(errors) => {
            let books = state.store.books().await?;
            let page = views::bookinstance_form(
                "Create Book Instance",
                &books,
                Some(&form.candidate()),
                &errors,
            );
            Ok(page.into_response())
        }
    }
}

/// Display delete confirmation; a missing copy goes back to the list.
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    match state.store.book_instance(id).await? {
        Some(copy) => Ok(views::bookinstance_delete(&copy).into_response()),
        None => Ok(Redirect::to("/catalog/bookinstances").into_response()),
    }
}

/// Delete form body; the id travels in the form, not the path.
#[derive(Debug, Deserialize)]
pub struct DeleteBookInstanceForm {
    #[serde(default)]
    pub bookinstanceid: i64,
}

/// Handle copy delete on POST: unconditional once the copy is found, back
/// to the list either way.
pub async fn delete(
    State(state): State<AppState>,
    Form(form): Form<DeleteBookInstanceForm>,
) -> AppResult<Redirect> {
    if state
        .store
        .book_instance(form.bookinstanceid)
        .await?
        .is_some()
    {
        state
            .store
            .delete_book_instance(form.bookinstanceid)
            .await?;
    }
    Ok(Redirect::to("/catalog/bookinstances"))
}

/// Display copy update form, pre-populated with the current values.
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let (copy, books) = tokio::try_join!(state.store.book_instance(id), state.store.books())?;
    let copy = copy.ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
    Ok(views::bookinstance_form(
        "Update Book Instance",
        &books,
        Some(&NewBookInstance::from(&copy)),
        &FormErrors::default(),
    ))
}

/// Handle copy update on POST: full-field replace under the same id.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match form.validated() {
        Ok(new_copy) => {
            let copy = state
                .store
                .update_book_instance(id, &new_copy)
                .await?
                .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
            Ok(Redirect::to(&copy.url()).into_response())
        }
        Err(errors) => {
            let books = state.store.books().await?;
            let page = views::bookinstance_form(
                "Update Book Instance",
                &books,
                Some(&form.candidate()),
                &errors,
            );
            Ok(page.into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use chrono::NaiveDate;
    use mockall::predicate;
    use tower::ServiceExt;

    use crate::models::book::BookSummary;
    use crate::models::book_instance::{BookInstance, BookInstanceDetail};
    use crate::repository::MockCatalogStore;

    fn app(store: MockCatalogStore) -> Router {
        crate::handlers::router(AppState {
            store: Arc::new(store),
        })
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn location(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn hobbit_copy(id: i64) -> BookInstanceDetail {
        BookInstanceDetail {
            id,
            book_id: 1,
            imprint: "Allen and Unwin, 1937".to_string(),
            status: "Loaned".to_string(),
            due_back: NaiveDate::from_ymd_opt(2023, 5, 1),
            book_title: "The Hobbit".to_string(),
        }
    }

    fn stored_copy(id: i64) -> BookInstance {
        BookInstance {
            id,
            book_id: 1,
            imprint: "Allen and Unwin, 1937".to_string(),
            status: "Loaned".to_string(),
            due_back: NaiveDate::from_ymd_opt(2023, 5, 1),
        }
    }

    fn book_choices() -> Vec<BookSummary> {
        vec![
            BookSummary {
                id: 1,
                title: "The Hobbit".to_string(),
            },
            BookSummary {
                id: 2,
                title: "Dune".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn list_renders_all_copies() {
        let mut store = MockCatalogStore::new();
        store
            .expect_book_instances()
            .returning(|| Ok(vec![hobbit_copy(3), hobbit_copy(4)]));

        let response = app(store).oneshot(get("/catalog/bookinstances")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Book Instance List"));
        assert!(body.contains("/catalog/bookinstance/3"));
        assert!(body.contains("/catalog/bookinstance/4"));
        assert!(body.contains("Allen and Unwin, 1937"));
    }

    #[tokio::test]
    async fn detail_renders_copy_with_book_title() {
        let mut store = MockCatalogStore::new();
        store
            .expect_book_instance_detail()
            .with(predicate::eq(3))
            .returning(|_| Ok(Some(hobbit_copy(3))));

        let response = app(store).oneshot(get("/catalog/bookinstance/3")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Copy: The Hobbit"));
        assert!(body.contains("Allen and Unwin, 1937"));
        // ISO date 2023-05-01 rendered from its calendar parts, no locale.
        assert!(body.contains("May 1, 2023"));
    }

    #[tokio::test]
    async fn detail_missing_copy_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_book_instance_detail().returning(|_| Ok(None));

        let response = app(store).oneshot(get("/catalog/bookinstance/99")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_text(response).await;
        assert!(body.contains("Book copy not found"));
    }

    #[tokio::test]
    async fn detail_store_failure_is_server_error() {
        let mut store = MockCatalogStore::new();
        store
            .expect_book_instance_detail()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let response = app(store).oneshot(get("/catalog/bookinstance/3")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn create_form_lists_books_for_selection() {
        let mut store = MockCatalogStore::new();
        store.expect_books().returning(|| Ok(book_choices()));

        let response = app(store)
            .oneshot(get("/catalog/bookinstance/create"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Create Book Instance"));
        assert!(body.contains("The Hobbit"));
        assert!(body.contains("Dune"));
    }

    #[tokio::test]
    async fn create_valid_copy_redirects_to_detail() {
        let mut store = MockCatalogStore::new();
        store
            .expect_create_book_instance()
            .withf(|copy| {
                copy.book_id == 1
                    && copy.imprint == "First edition"
                    && copy.due_back == NaiveDate::from_ymd_opt(2023, 5, 1)
            })
            .returning(|copy| {
                Ok(BookInstance {
                    id: 7,
                    book_id: copy.book_id,
                    imprint: copy.imprint.clone(),
                    status: copy.status.to_string(),
                    due_back: copy.due_back,
                })
            });

        let response = app(store)
            .oneshot(form_post(
                "/catalog/bookinstance/create",
                "book=1&imprint=First+edition&status=Available&due_back=2023-05-01",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/catalog/bookinstance/7");
    }

    #[tokio::test]
    async fn create_invalid_copy_rerenders_without_persisting() {
        let mut store = MockCatalogStore::new();
        // No create expectation: persisting would panic the mock.
        store.expect_books().returning(|| Ok(book_choices()));

        let response = app(store)
            .oneshot(form_post(
                "/catalog/bookinstance/create",
                "book=1&imprint=&status=Loaned&due_back=",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Imprint must be specified"));
        // The entered selection survives the re-render.
        assert!(body.contains("<option value=\"1\" selected>The Hobbit</option>"));
        assert!(body.contains("<option value=\"Loaned\" selected>Loaned</option>"));
    }

    #[tokio::test]
    async fn create_rejects_malformed_due_date() {
        let mut store = MockCatalogStore::new();
        store.expect_books().returning(|| Ok(book_choices()));

        let response = app(store)
            .oneshot(form_post(
                "/catalog/bookinstance/create",
                "book=1&imprint=First+edition&status=Available&due_back=05%2F01%2F2023",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Invalid date"));
    }

    #[tokio::test]
    async fn delete_form_shows_copy() {
        let mut store = MockCatalogStore::new();
        store
            .expect_book_instance()
            .with(predicate::eq(4))
            .returning(|_| Ok(Some(stored_copy(4))));

        let response = app(store)
            .oneshot(get("/catalog/bookinstance/4/delete"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Delete Book Instance"));
        assert!(body.contains("name=\"bookinstanceid\" value=\"4\""));
    }

    #[tokio::test]
    async fn delete_form_missing_copy_redirects() {
        let mut store = MockCatalogStore::new();
        store.expect_book_instance().returning(|_| Ok(None));

        let response = app(store)
            .oneshot(get("/catalog/bookinstance/99/delete"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/catalog/bookinstances");
    }

    #[tokio::test]
    async fn delete_existing_copy_redirects_to_list() {
        let mut store = MockCatalogStore::new();
        store
            .expect_book_instance()
            .with(predicate::eq(4))
            .returning(|_| Ok(Some(stored_copy(4))));
        store
            .expect_delete_book_instance()
            .with(predicate::eq(4))
            .returning(|_| Ok(true));

        let response = app(store)
            .oneshot(form_post(
                "/catalog/bookinstance/4/delete",
                "bookinstanceid=4",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/catalog/bookinstances");
    }

    #[tokio::test]
    async fn delete_missing_copy_redirects_to_list() {
        let mut store = MockCatalogStore::new();
        store.expect_book_instance().returning(|_| Ok(None));
        // No delete expectation: nothing may be removed.

        let response = app(store)
            .oneshot(form_post(
                "/catalog/bookinstance/99/delete",
                "bookinstanceid=99",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/catalog/bookinstances");
    }

    #[tokio::test]
    async fn update_form_prepopulates_fields() {
        let mut store = MockCatalogStore::new();
        store
            .expect_book_instance()
            .with(predicate::eq(4))
            .returning(|_| Ok(Some(stored_copy(4))));
        store.expect_books().returning(|| Ok(book_choices()));

        let response = app(store)
            .oneshot(get("/catalog/bookinstance/4/update"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Update Book Instance"));
        assert!(body.contains("value=\"Allen and Unwin, 1937\""));
        assert!(body.contains("<option value=\"1\" selected>The Hobbit</option>"));
        assert!(body.contains("<option value=\"Loaned\" selected>Loaned</option>"));
    }

    #[tokio::test]
    async fn update_form_missing_copy_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_book_instance().returning(|_| Ok(None));
        store.expect_books().returning(|| Ok(book_choices()));

        let response = app(store)
            .oneshot(get("/catalog/bookinstance/99/update"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_valid_copy_redirects_to_same_detail_url() {
        let mut store = MockCatalogStore::new();
        store
            .expect_update_book_instance()
            .withf(|id, copy| *id == 9 && copy.imprint == "Second edition")
            .returning(|id, copy| {
                Ok(Some(BookInstance {
                    id,
                    book_id: copy.book_id,
                    imprint: copy.imprint.clone(),
                    status: copy.status.to_string(),
                    due_back: copy.due_back,
                }))
            });

        let response = app(store)
            .oneshot(form_post(
                "/catalog/bookinstance/9/update",
                "book=2&imprint=Second+edition&status=Available&due_back=",
            ))
            .await
            .unwrap();

        // Identity preserved: the redirect targets the existing canonical URL.
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/catalog/bookinstance/9");
    }

    #[tokio::test]
    async fn update_invalid_copy_rerenders_with_errors() {
        let mut store = MockCatalogStore::new();
        store.expect_books().returning(|| Ok(book_choices()));
        // No update expectation: nothing may be written.

        let response = app(store)
            .oneshot(form_post(
                "/catalog/bookinstance/9/update",
                "book=&imprint=&status=Available&due_back=",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Book must be specified"));
        assert!(body.contains("Imprint must be specified"));
    }

    #[tokio::test]
    async fn update_vanished_copy_is_not_found() {
        let mut store = MockCatalogStore::new();
        store
            .expect_update_book_instance()
            .returning(|_, _| Ok(None));

        let response = app(store)
            .oneshot(form_post(
                "/catalog/bookinstance/9/update",
                "book=2&imprint=Second+edition&status=Available&due_back=",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
