//! Data models for the LocalLibrary catalog

pub mod book;
pub mod book_instance;
pub mod genre;

// Re-export commonly used types
pub use book::{Book, BookSummary};
pub use book_instance::{BookInstance, BookInstanceDetail, CopyStatus, NewBookInstance};
pub use genre::{Genre, NewGenre};
