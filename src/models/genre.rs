//! Genre model and form types.

use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use crate::forms::{self, not_blank, FormErrors};

/// Stored genre record.
///
/// Names are expected unique in practice, but the table carries no UNIQUE
/// constraint; creation runs a find-by-name pre-check instead and redirects
/// to the existing record on a hit.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

impl Genre {
    /// Canonical detail URL for this genre.
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Validated field set for create and update. Identity comes from the route.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGenre {
    pub name: String,
}

impl From<&Genre> for NewGenre {
    fn from(genre: &Genre) -> Self {
        NewGenre {
            name: genre.name.clone(),
        }
    }
}

/// Raw create/update form body.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(custom(function = not_blank))]
    pub name: String,
}

const MESSAGES: [(&str, &str); 1] = [("name", "Genre name required")];

impl GenreForm {
    /// The genre as entered, so a failed submission can be re-rendered with
    /// the user's value.
    pub fn candidate(&self) -> NewGenre {
        NewGenre {
            name: forms::sanitize(&self.name),
        }
    }

    /// Validation pipeline: the sanitized name, or the error list for the
    /// form to re-render.
    pub fn validated(&self) -> Result<NewGenre, FormErrors> {
        match self.validate() {
            Ok(()) => Ok(self.candidate()),
            Err(errors) => Err(FormErrors::collect(&errors, &MESSAGES)),
        }
    }
}
