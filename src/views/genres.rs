//! Genre views: list, detail, create/update form, delete confirmation.

use axum::response::Html;

use crate::forms::FormErrors;
use crate::models::book::Book;
use crate::models::genre::{Genre, NewGenre};

use super::{error_list, escape, layout};

fn book_list(books: &[Book]) -> String {
    let mut out = String::from("<dl>\n");
    for book in books {
        out.push_str(&format!(
            "  <dt>{}</dt>\n  <dd>{}</dd>\n",
            escape(&book.title),
            escape(&book.summary),
        ));
    }
    out.push_str("</dl>\n");
    out
}

/// Genre list page, names in ascending order as the store returns them.
pub fn genre_list(genres: &[Genre]) -> Html<String> {
    let title = "Genre list";
    let mut body = format!("<h1>{}</h1>\n<ul>\n", title);
    for genre in genres {
        body.push_str(&format!(
            "  <li><a href=\"{}\">{}</a></li>\n",
            genre.url(),
            escape(&genre.name),
        ));
    }
    body.push_str("</ul>\n");
    layout(title, &body)
}

/// Genre detail page with the books carrying this genre.
pub fn genre_detail(genre: &Genre, books: &[Book]) -> Html<String> {
    let title = "Genre Detail";
    let mut body = format!("<h1>Genre: {}</h1>\n", escape(&genre.name));
    if books.is_empty() {
        body.push_str("<p>This genre has no books.</p>\n");
    } else {
        body.push_str("<h4>Books</h4>\n");
        body.push_str(&book_list(books));
    }
    layout(title, &body)
}

/// Create/update form. `genre` pre-populates the name field.
pub fn genre_form(title: &str, genre: Option<&NewGenre>, errors: &FormErrors) -> Html<String> {
    let name = genre.map(|g| g.name.as_str()).unwrap_or("");
    let body = format!(
        "<h1>{title}</h1>\n\
         <form method=\"POST\">\n\
           <div class=\"form-group\">\n\
             <label for=\"name\">Genre:</label>\n\
             <input id=\"name\" name=\"name\" class=\"form-control\" type=\"text\" \
         placeholder=\"Fantasy, Poetry etc.\" value=\"{name}\" required>\n\
           </div>\n\
           <button class=\"btn btn-primary\" type=\"submit\">Submit</button>\n\
         </form>\n\
         {errors}",
        title = escape(title),
        name = escape(name),
        errors = error_list(errors),
    );
    layout(title, &body)
}

/// Delete confirmation page. While books still reference the genre, the page
/// lists them instead of offering the delete button.
pub fn genre_delete(genre: &Genre, books: &[Book]) -> Html<String> {
    let title = "Delete Genre";
    let mut body = format!("<h1>{}: {}</h1>\n", title, escape(&genre.name));
    if books.is_empty() {
        body.push_str(&format!(
            "<p>Do you really want to delete this genre?</p>\n\
             <form method=\"POST\">\n\
               <input type=\"hidden\" name=\"genreid\" value=\"{}\">\n\
               <button class=\"btn btn-primary\" type=\"submit\">Delete</button>\n\
             </form>\n",
            genre.id,
        ));
    } else {
        body.push_str(
            "<p>Delete the following books before attempting to delete this genre.</p>\n",
        );
        body.push_str(&book_list(books));
    }
    layout(title, &body)
}
