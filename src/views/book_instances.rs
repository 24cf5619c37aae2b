//! Book copy views: list, detail, create/update form, delete confirmation.

use axum::response::Html;

use crate::forms::{FormErrors, DATE_FORMAT};
use crate::models::book::BookSummary;
use crate::models::book_instance::{BookInstance, BookInstanceDetail, CopyStatus, NewBookInstance};

use super::{error_list, escape, layout};

fn status_class(status: CopyStatus) -> &'static str {
    match status {
        CopyStatus::Available => "text-success",
        CopyStatus::Maintenance => "text-danger",
        _ => "text-warning",
    }
}

/// Copy list page.
pub fn bookinstance_list(copies: &[BookInstanceDetail]) -> Html<String> {
    let title = "Book Instance List";
    let mut body = format!("<h1>{}</h1>\n", title);
    if copies.is_empty() {
        body.push_str("<p>There are no book copies in this library.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for copy in copies {
            let status = copy.status();
            let mut line = format!(
                "  <li><a href=\"{}\">{} : {}</a> - <span class=\"{}\">{}</span>",
                copy.url(),
                escape(&copy.book_title),
                escape(&copy.imprint),
                status_class(status),
                status,
            );
            if status != CopyStatus::Available && copy.due_back.is_some() {
                line.push_str(&format!(" (Due: {})", copy.due_back_formatted()));
            }
            line.push_str("</li>\n");
            body.push_str(&line);
        }
        body.push_str("</ul>\n");
    }
    layout(title, &body)
}

/// Copy detail page; the title carries the resolved book title.
pub fn bookinstance_detail(copy: &BookInstanceDetail) -> Html<String> {
    let title = format!("Copy: {}", copy.book_title);
    let status = copy.status();
    let mut body = format!(
        "<h1>ID: {}</h1>\n\
         <p><strong>Title:</strong> {}</p>\n\
         <p><strong>Imprint:</strong> {}</p>\n\
         <p><strong>Status:</strong> <span class=\"{}\">{}</span></p>\n",
        copy.id,
        escape(&copy.book_title),
        escape(&copy.imprint),
        status_class(status),
        status,
    );
    if copy.due_back.is_some() {
        body.push_str(&format!(
            "<p><strong>Due back:</strong> {}</p>\n",
            copy.due_back_formatted()
        ));
    }
    layout(&title, &body)
}

/// Create/update form. `copy` pre-populates the fields: the current record
/// for update, the user's entered values after a failed submission, absent
/// for a fresh create form.
pub fn bookinstance_form(
    title: &str,
    books: &[BookSummary],
    copy: Option<&NewBookInstance>,
    errors: &FormErrors,
) -> Html<String> {
    let selected_book = copy.map(|c| c.book_id);
    let selected_status = copy.map(|c| c.status);
    let imprint = copy.map(|c| c.imprint.as_str()).unwrap_or("");
    let due_back = copy
        .and_then(|c| c.due_back)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default();

    let mut book_options =
        String::from("      <option value=\"\">--Please select a book--</option>\n");
    for book in books {
        let selected = if selected_book == Some(book.id) {
            " selected"
        } else {
            ""
        };
        book_options.push_str(&format!(
            "      <option value=\"{}\"{}>{}</option>\n",
            book.id,
            selected,
            escape(&book.title),
        ));
    }

    let mut status_options = String::new();
    for status in CopyStatus::ALL {
        let selected = if selected_status == Some(status) {
            " selected"
        } else {
            ""
        };
        status_options.push_str(&format!(
            "      <option value=\"{status}\"{selected}>{status}</option>\n"
        ));
    }

    let body = format!(
        "<h1>{title}</h1>\n\
         <form method=\"POST\">\n\
           <div class=\"form-group\">\n\
             <label for=\"book\">Book:</label>\n\
             <select id=\"book\" name=\"book\" class=\"form-control\" required>\n\
         {book_options}\
             </select>\n\
           </div>\n\
           <div class=\"form-group\">\n\
             <label for=\"imprint\">Imprint:</label>\n\
             <input id=\"imprint\" name=\"imprint\" class=\"form-control\" type=\"text\" \
         placeholder=\"Publisher and date information\" value=\"{imprint}\" required>\n\
           </div>\n\
           <div class=\"form-group\">\n\
             <label for=\"due_back\">Date when book available:</label>\n\
             <input id=\"due_back\" name=\"due_back\" class=\"form-control\" type=\"date\" \
         value=\"{due_back}\">\n\
           </div>\n\
           <div class=\"form-group\">\n\
             <label for=\"status\">Status:</label>\n\
             <select id=\"status\" name=\"status\" class=\"form-control\" required>\n\
         {status_options}\
             </select>\n\
           </div>\n\
           <button class=\"btn btn-primary\" type=\"submit\">Submit</button>\n\
         </form>\n\
         {errors}",
        title = escape(title),
        book_options = book_options,
        imprint = escape(imprint),
        due_back = due_back,
        status_options = status_options,
        errors = error_list(errors),
    );
    layout(title, &body)
}

/// Delete confirmation page; the submitted id travels in the form body.
pub fn bookinstance_delete(copy: &BookInstance) -> Html<String> {
    let title = "Delete Book Instance";
    let body = format!(
        "<h1>{}</h1>\n\
         <p><strong>Imprint:</strong> {}</p>\n\
         <p><strong>Status:</strong> {}</p>\n\
         <p>Do you really want to delete this copy?</p>\n\
         <form method=\"POST\">\n\
           <input type=\"hidden\" name=\"bookinstanceid\" value=\"{}\">\n\
           <button class=\"btn btn-primary\" type=\"submit\">Delete</button>\n\
         </form>\n",
        title,
        escape(&copy.imprint),
        copy.status(),
        copy.id,
    );
    layout(title, &body)
}
