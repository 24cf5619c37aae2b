//! Request handlers for the LocalLibrary catalog pages

pub mod book_instances;
pub mod genres;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        // Book copies
        .route("/bookinstances", get(book_instances::list))
        .route("/bookinstance/create", get(book_instances::create_form))
        .route("/bookinstance/create", post(book_instances::create))
        .route("/bookinstance/:id", get(book_instances::detail))
        .route("/bookinstance/:id/delete", get(book_instances::delete_form))
        .route("/bookinstance/:id/delete", post(book_instances::delete))
        .route("/bookinstance/:id/update", get(book_instances::update_form))
        .route("/bookinstance/:id/update", post(book_instances::update))
        // Genres
        .route("/genres", get(genres::list))
        .route("/genre/create", get(genres::create_form))
        .route("/genre/create", post(genres::create))
        .route("/genre/:id", get(genres::detail))
        .route("/genre/:id/delete", get(genres::delete_form))
        .route("/genre/:id/delete", post(genres::delete))
        .route("/genre/:id/update", get(genres::update_form))
        .route("/genre/:id/update", post(genres::update))
        .with_state(state);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/catalog", catalog)
        .layer(TraceLayer::new_for_http())
}
