//! Form validation and sanitization plumbing.
//!
//! Raw form bodies are deserialized by `serde`, checked with the `validator`
//! crate, and flattened into an ordered message list the views can render.
//! String input is sanitized against markup injection before it reaches
//! persistence.

use chrono::NaiveDate;
use validator::{ValidationError, ValidationErrors};

/// Calendar date format accepted by the copy forms (ISO-8601).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation messages in form-field order, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors(Vec<String>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Flatten `ValidationErrors` through a field → message table.
    ///
    /// The validator crate reports errors as an unordered map; the table fixes
    /// both the rendered order and the user-facing wording per field.
    pub fn collect(errors: &ValidationErrors, table: &[(&str, &str)]) -> Self {
        let fields = errors.field_errors();
        let messages = table
            .iter()
            .filter(|(field, _)| fields.contains_key(*field))
            .map(|(_, message)| (*message).to_string())
            .collect();
        FormErrors(messages)
    }
}

/// Field passes only when non-empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Optional date field: empty is fine, anything else must parse as an
/// ISO-8601 calendar date.
pub fn iso_date(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_date"))
}

/// Trim, then replace the characters HTML treats as markup with entities.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Parse an optional form date. Unparseable input degrades to `None` so the
/// submission can still be re-rendered; validation reports the message.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
