//! Book instance (physical copy) model and form types.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use crate::forms::{self, iso_date, not_blank, FormErrors};

/// Lifecycle status of a physical copy.
///
/// Rows keep the raw text label; this enum sits alongside for parsing and for
/// the form select, with `Maintenance` as the schema default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl CopyStatus {
    /// All statuses, in the order the form select presents them.
    pub const ALL: [CopyStatus; 4] = [
        CopyStatus::Available,
        CopyStatus::Maintenance,
        CopyStatus::Loaned,
        CopyStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyStatus::Available => "Available",
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::Loaned => "Loaned",
            CopyStatus::Reserved => "Reserved",
        }
    }

    /// Parse a stored or submitted label; anything unrecognized falls back to
    /// `Maintenance`.
    pub fn parse(value: &str) -> Self {
        match value {
            "Available" => CopyStatus::Available,
            "Loaned" => CopyStatus::Loaned,
            "Reserved" => CopyStatus::Reserved,
            _ => CopyStatus::Maintenance,
        }
    }
}

impl std::fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored copy record.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BookInstance {
    pub id: i64,
    pub book_id: i64,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    /// Canonical detail URL for this copy.
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn status(&self) -> CopyStatus {
        CopyStatus::parse(&self.status)
    }
}

/// Copy with its book reference resolved, as the list and detail views need it.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BookInstanceDetail {
    pub id: i64,
    pub book_id: i64,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
    pub book_title: String,
}

impl BookInstanceDetail {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn status(&self) -> CopyStatus {
        CopyStatus::parse(&self.status)
    }

    /// Due date for display ("May 1, 2023"); empty when absent. The numeric
    /// date parts come straight from the stored value, never from a locale.
    pub fn due_back_formatted(&self) -> String {
        self.due_back
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

/// Validated field set for create and update. Updates replace every field;
/// identity comes from the route.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookInstance {
    pub book_id: i64,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<NaiveDate>,
}

impl From<&BookInstance> for NewBookInstance {
    fn from(copy: &BookInstance) -> Self {
        NewBookInstance {
            book_id: copy.book_id,
            imprint: copy.imprint.clone(),
            status: copy.status(),
            due_back: copy.due_back,
        }
    }
}

/// Raw create/update form body.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(custom(function = not_blank))]
    pub book: String,
    #[serde(default)]
    #[validate(custom(function = not_blank))]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = iso_date))]
    pub due_back: String,
}

/// Field order and wording for rendered validation messages.
const MESSAGES: [(&str, &str); 3] = [
    ("book", "Book must be specified"),
    ("imprint", "Imprint must be specified"),
    ("due_back", "Invalid date"),
];

impl BookInstanceForm {
    /// The copy as entered, parsed lossily so a failed submission can be
    /// re-rendered with the user's values.
    pub fn candidate(&self) -> NewBookInstance {
        NewBookInstance {
            book_id: self.book.trim().parse().unwrap_or(0),
            imprint: forms::sanitize(&self.imprint),
            status: CopyStatus::parse(self.status.trim()),
            due_back: forms::parse_due_date(&self.due_back),
        }
    }

    /// Validation pipeline: the sanitized field set, or the ordered error
    /// list for the form to re-render.
    pub fn validated(&self) -> Result<NewBookInstance, FormErrors> {
        match self.validate() {
            Ok(()) => Ok(self.candidate()),
            Err(errors) => Err(FormErrors::collect(&errors, &MESSAGES)),
        }
    }
}
