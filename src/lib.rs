//! LocalLibrary Catalog Server
//!
//! A Rust implementation of the LocalLibrary catalog website, serving
//! server-rendered pages for managing book copies and genres.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn repository::CatalogStore>,
}
