//! Server-rendered views.
//!
//! One function per named view, each taking its typed context and returning
//! the full page as `Html<String>`. Interpolated text is escaped here at
//! render time; form input has already been sanitized on the way in, so user
//! text shows up double-escaped, matching the original stack.

use axum::http::StatusCode;
use axum::response::Html;

mod book_instances;
mod genres;

pub use book_instances::{
    bookinstance_delete, bookinstance_detail, bookinstance_form, bookinstance_list,
};
pub use genres::{genre_delete, genre_detail, genre_form, genre_list};

use crate::forms::FormErrors;

/// Escape text for interpolation into HTML.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared page chrome: sidebar navigation plus the view body.
pub(crate) fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
</head>
<body>
  <div class="container-fluid">
    <div class="row">
      <div class="col-sm-2">
        <ul class="sidebar-nav">
          <li><a href="/catalog/bookinstances">All book copies</a></li>
          <li><a href="/catalog/genres">All genres</a></li>
          <li><a href="/catalog/bookinstance/create">Create new copy</a></li>
          <li><a href="/catalog/genre/create">Create new genre</a></li>
        </ul>
      </div>
      <div class="col-sm-10">
{body}
      </div>
    </div>
  </div>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    ))
}

/// Validation messages as a list, or nothing when the form is clean.
pub(crate) fn error_list(errors: &FormErrors) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .messages()
        .iter()
        .map(|message| format!("  <li>{}</li>\n", escape(message)))
        .collect();
    format!("<ul class=\"error-list\">\n{}</ul>\n", items)
}

/// Generic error page, rendered by the application error handler.
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = if status == StatusCode::NOT_FOUND {
        "Not Found"
    } else {
        "Server Error"
    };
    layout(
        title,
        &format!(
            "<h1>{}</h1>\n<p>Status: {}</p>\n",
            escape(message),
            status.as_u16()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;/b&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_layout_carries_title_and_body() {
        let Html(page) = layout("Genre list", "<h1>Genre list</h1>");
        assert!(page.contains("<title>Genre list</title>"));
        assert!(page.contains("<h1>Genre list</h1>"));
        assert!(page.contains("/catalog/bookinstances"));
    }

    #[test]
    fn test_error_page_shows_status() {
        let Html(page) = error_page(StatusCode::NOT_FOUND, "Genre not found");
        assert!(page.contains("<title>Not Found</title>"));
        assert!(page.contains("Genre not found"));
        assert!(page.contains("Status: 404"));
    }
}
