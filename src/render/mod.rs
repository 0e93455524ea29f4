//! Rendering a bibliography into an HTML template.
//!
//! The template is an opaque string carrying five literal placeholder
//! tokens; rendering replaces each token and nothing else. Entries render
//! as one `<li>` each, in document order.

pub mod cleanup;

use std::str::FromStr;

use chrono::NaiveDate;

use crate::bibliography::Bibliography;
use crate::entry::Entry;
use crate::error::RenderError;
use cleanup::{cleanup_author, cleanup_pages, cleanup_title, tidy};

/// The literal placeholder tokens a template must contain.
pub mod placeholder {
    /// Replaced by the number of entries.
    pub const REFERENCE_COUNT: &str = "<!--NUMBER_OF_REFERENCES-->";
    /// Replaced by the configured "newer" navigation text, or nothing.
    pub const NEWER: &str = "<!--NEWER-->";
    /// Replaced by the configured "older" navigation text, or nothing.
    pub const OLDER: &str = "<!--OLDER-->";
    /// Replaced by the render date.
    pub const DATE: &str = "<!--DATE-->";
    /// Replaced by the `<ul>` of references.
    pub const REFERENCE_LIST: &str = "<!--LIST_OF_REFERENCES-->";

    pub const REQUIRED: [&str; 5] = [REFERENCE_COUNT, NEWER, OLDER, DATE, REFERENCE_LIST];
}

/// A template string verified to contain every required placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template(String);

impl Template {
    pub fn new(raw: impl Into<String>) -> Result<Self, RenderError> {
        let raw = raw.into();
        for token in placeholder::REQUIRED {
            if !raw.contains(token) {
                return Err(RenderError::MissingPlaceholder(token));
            }
        }
        Ok(Template(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Template {
    type Err = RenderError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Template::new(raw)
    }
}

/// Per-render parameters. Everything that would otherwise be process-global
/// state lives here, so rendering stays a pure function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// Text for the `<!--NEWER-->` placeholder; empty when `None`.
    pub newer: Option<String>,
    /// Text for the `<!--OLDER-->` placeholder; empty when `None`.
    pub older: Option<String>,
    /// The date substituted for `<!--DATE-->`; today when `None`.
    pub date: Option<NaiveDate>,
}

/// Render the bibliography into the template.
pub fn render(bib: &Bibliography, template: &Template, config: &RenderConfig) -> String {
    let date = config
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let html = template
        .as_str()
        .replace(placeholder::REFERENCE_COUNT, &bib.len().to_string())
        .replace(placeholder::NEWER, config.newer.as_deref().unwrap_or(""))
        .replace(placeholder::OLDER, config.older.as_deref().unwrap_or(""))
        .replace(placeholder::DATE, &date.format("%d %b %Y").to_string())
        .replace(placeholder::REFERENCE_LIST, &reference_list(bib));
    tracing::debug!(entries = bib.len(), bytes = html.len(), "rendered template");
    html
}

fn reference_list(bib: &Bibliography) -> String {
    let mut html = String::from("<ul>\n");
    for entry in bib {
        html.push_str(&format_reference(entry));
    }
    html.push_str("</ul>\n");
    html
}

/// Format one entry as an HTML list item.
///
/// Title and year in bold, then authors, then the venue (`booktitle`, or
/// `journal` as a fallback) with pages, then a `[link]` anchor if the entry
/// has a `url`. Fields the entry does not have are left out.
pub fn format_reference(entry: &Entry) -> String {
    let mut html = format!("<li id=\"{}\">", entry.key);

    if let Some(title) = entry.field("title") {
        html.push_str("<strong>");
        html.push_str(&cleanup_title(title));
        html.push_str("</strong>");
        if let Some(year) = entry.field("year") {
            html.push_str(", ");
            html.push_str(&tidy(year));
        }
        html.push('.');
    }

    if let Some(author) = entry.field("author") {
        html.push('\n');
        html.push_str(&cleanup_author(author));
        html.push('.');
    }

    if let Some(venue) = entry.field("booktitle").or_else(|| entry.field("journal")) {
        html.push_str("\n<em>");
        html.push_str(&tidy(venue));
        html.push_str("</em>");
        if let Some(pages) = entry.field("pages") {
            html.push_str(", pp. ");
            html.push_str(&cleanup_pages(pages));
        }
        html.push('.');
    }

    if let Some(url) = entry.field("url") {
        html.push_str("\n<a href=\"");
        html.push_str(&tidy(url));
        html.push_str("\">[link]</a>");
    }

    html.push_str("</li>\n");
    html
}
