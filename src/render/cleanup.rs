//! Field value cleanup applied before HTML formatting.

/// LaTeX accent commands and their HTML entity replacements, applied to
/// author names.
static LATEX_ENTITIES: [(&str, &str); 26] = [
    ("\\\"a", "&auml;"),
    ("\\\"A", "&Auml;"),
    ("\\\"e", "&euml;"),
    ("\\\"E", "&Euml;"),
    ("\\\"i", "&iuml;"),
    ("\\\"I", "&Iuml;"),
    ("\\\"o", "&ouml;"),
    ("\\\"O", "&Ouml;"),
    ("\\\"u", "&uuml;"),
    ("\\\"U", "&Uuml;"),
    ("\\'a", "&aacute;"),
    ("\\'A", "&Aacute;"),
    ("\\'e", "&eacute;"),
    ("\\'E", "&Eacute;"),
    ("\\'i", "&iacute;"),
    ("\\'I", "&Iacute;"),
    ("\\'o", "&oacute;"),
    ("\\'O", "&Oacute;"),
    ("\\'u", "&uacute;"),
    ("\\'U", "&Uacute;"),
    ("\\~n", "&ntilde;"),
    ("\\~N", "&Ntilde;"),
    ("\\~a", "&atilde;"),
    ("\\~A", "&Atilde;"),
    ("\\~o", "&otilde;"),
    ("\\~O", "&Otilde;"),
];

/// Collapse runs of whitespace into single spaces and trim. Field values
/// keep the source file's line breaks, which have no place in the output.
pub(crate) fn tidy(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean up and format an author list: replace LaTeX accents with HTML
/// entities, strip braces, and join names "A, B and C" style.
pub fn cleanup_author(value: &str) -> String {
    let mut out = tidy(value);
    for (latex, entity) in LATEX_ENTITIES {
        if out.contains(latex) {
            out = out.replace(latex, entity);
        }
    }
    out.retain(|ch| ch != '{' && ch != '}');
    let out = out.replace(" And ", " and ");
    match out.rsplit_once(" and ") {
        Some((head, last)) => format!("{} and {}", head.replace(" and ", ", "), last),
        None => out,
    }
}

/// Clean up an article title: strip braces and sentence-case.
pub fn cleanup_title(value: &str) -> String {
    let mut stripped = tidy(value);
    stripped.retain(|ch| ch != '{' && ch != '}');
    let lower = stripped.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => lower,
    }
}

/// Clean up a page range: BibTeX `--` becomes a plain dash.
pub fn cleanup_pages(value: &str) -> String {
    tidy(value).replace("--", "-")
}
