//! Genre handlers: list, detail, create, delete, update.
//!
//! Two rules distinguish genres from copies: creation runs a duplicate-name
//! pre-check and redirects to the existing record on a hit, and deletion is
//! refused while any book still references the genre.

use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    forms::FormErrors,
    models::genre::{GenreForm, NewGenre},
    views, AppState,
};

/// Display list of all genres, name ascending.
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.store.genres().await?;
    Ok(views::genre_list(&genres))
}

/// Display detail page for a specific genre with the books carrying it.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let (genre, books) = tokio::try_join!(state.store.genre(id), state.store.books_by_genre(id))?;
    let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
    Ok(views::genre_detail(&genre, &books))
}

/// Display genre create form.
pub async fn create_form() -> Html<String> {
    views::genre_form("Create Genre", None, &FormErrors::default())
}

/// Handle genre create on POST. A stored genre with the same name wins over
/// inserting a duplicate: the client is redirected to the existing record.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match form.validated() {
        Ok(new_genre) => {
            if let Some(found) = state.store.genre_by_name(&new_genre.name).await? {
                return Ok(Redirect::to(&found.url()).into_response());
            }
            let genre = state.store.create_genre(&new_genre).await?;
            Ok(Redirect::to(&genre.url()).into_response())
        }
        Err(errors) => {
            let page = views::genre_form("Create Genre", Some(&form.candidate()), &errors);
            Ok(page.into_response())
        }
    }
}

/// Display delete confirmation with the books still referencing the genre;
/// a missing genre goes back to the list.
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let (genre, books) = tokio::try_join!(state.store.genre(id), state.store.books_by_genre(id))?;
    match genre {
        Some(genre) => Ok(views::genre_delete(&genre, &books).into_response()),
        None => Ok(Redirect::to("/catalog/genres").into_response()),
    }
}

/// Delete form body; the id travels in the form, not the path.
#[derive(Debug, Deserialize)]
pub struct DeleteGenreForm {
    #[serde(default)]
    pub genreid: i64,
}

/// Handle genre delete on POST. Blocking books refuse the deletion and
/// re-render the confirmation view with the current list.
pub async fn delete(
    State(state): State<AppState>,
    Form(form): Form<DeleteGenreForm>,
) -> AppResult<Response> {
    let (genre, books) = tokio::try_join!(
        state.store.genre(form.genreid),
        state.store.books_by_genre(form.genreid)
    )?;
    let Some(genre) = genre else {
        return Ok(Redirect::to("/catalog/genres").into_response());
    };
    if !books.is_empty() {
        return Ok(views::genre_delete(&genre, &books).into_response());
    }
    state.store.delete_genre(genre.id).await?;
    Ok(Redirect::to("/catalog/genres").into_response())
}

/// Display genre update form, pre-populated.
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let genre = state
        .store
        .genre(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
    Ok(views::genre_form(
        "Update Genre",
        Some(&NewGenre::from(&genre)),
        &FormErrors::default(),
    ))
}

/// Handle genre update on POST: name replace under the same id.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match form.validated() {
        Ok(new_genre) => {
            let genre = state
                .store
                .update_genre(id, &new_genre)
                .await?
                .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
            Ok(Redirect::to(&genre.url()).into_response())
        }
        Err(errors) => {
            let page = views::genre_form("Update Genre", Some(&form.candidate()), &errors);
            Ok(page.into_response())
        }
    }
}
