use crate::core::PathPrefix;
use crate::embed::view::{NOT_FOUND_HTML, NotFoundVars};
use crate::utils::html::escape_attr;

/// The 404 page, linking back to the service root.
pub fn render_not_found(prefix: &PathPrefix) -> String {
    NOT_FOUND_HTML.render(&NotFoundVars {
        prefix: escape_attr(prefix.as_str()).into_owned(),
    })
}
