use chrono::NaiveDate;

use bibtex2html::error::{EntryId, SyntaxError};
use bibtex2html::render::placeholder;
use bibtex2html::{Bibliography, RenderConfig, RenderError, Template, render};

const TWO_ENTRIES: &str = r#"
@inproceedings{doe2020,
  author    = {Doe, Jane},
  title     = {A First Example Paper},
  booktitle = {Proceedings of Examples},
  year      = 2020,
}

@article{lee2021,
  author  = {Lee, Kim},
  title   = {A Second Example Paper},
  journal = {Journal of Examples},
  year    = 2021,
}
"#;

fn minimal_template() -> Template {
    Template::new(
        "count=<!--NUMBER_OF_REFERENCES-->\n\
         newer=<!--NEWER-->\n\
         older=<!--OLDER-->\n\
         date=<!--DATE-->\n\
         <!--LIST_OF_REFERENCES-->",
    )
    .unwrap()
}

fn fixed_date() -> RenderConfig {
    RenderConfig {
        date: Some(NaiveDate::from_ymd_opt(2021, 2, 1).unwrap()),
        ..RenderConfig::default()
    }
}

#[test]
fn test_count_substitution() {
    let bib: Bibliography = TWO_ENTRIES.parse().unwrap();
    let html = render(&bib, &minimal_template(), &fixed_date());
    assert!(html.contains("count=2\n"));
}

#[test]
fn test_entries_render_in_source_order() {
    let bib: Bibliography = TWO_ENTRIES.parse().unwrap();
    let html = render(&bib, &minimal_template(), &fixed_date());
    let first = html.find("<li id=\"doe2020\">").unwrap();
    let second = html.find("<li id=\"lee2021\">").unwrap();
    assert!(first < second);
    assert!(html.contains("<strong>A first example paper</strong>, 2020."));
    assert!(html.contains("<strong>A second example paper</strong>, 2021."));
}

#[test]
fn test_date_substitution() {
    let bib: Bibliography = TWO_ENTRIES.parse().unwrap();
    let html = render(&bib, &minimal_template(), &fixed_date());
    assert!(html.contains("date=01 Feb 2021\n"));
}

#[test]
fn test_navigation_defaults_to_empty() {
    let bib = Bibliography::default();
    let html = render(&bib, &minimal_template(), &fixed_date());
    assert!(html.contains("newer=\n"));
    assert!(html.contains("older=\n"));
    for token in placeholder::REQUIRED {
        assert!(!html.contains(token));
    }
}

#[test]
fn test_missing_placeholder_is_a_render_error() {
    for token in placeholder::REQUIRED {
        let partial = placeholder::REQUIRED
            .iter()
            .copied()
            .filter(|other| *other != token)
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(
            Template::new(partial),
            Err(RenderError::MissingPlaceholder(token))
        );
    }
}

#[test]
fn test_unterminated_value_cites_the_entry() {
    let err = "@article{doe2020,\n  title = {Unterminated"
        .parse::<Bibliography>()
        .unwrap_err();
    assert_eq!(err.code, SyntaxError::UnterminatedTextToken);
    assert_eq!(err.entry, Some(EntryId::Key("doe2020".into())));
    assert!(err.to_string().contains("doe2020"));
}

#[test]
fn test_asset_files_convert() {
    let bib_source = std::fs::read_to_string("assets/example.bib").unwrap();
    let template_source = std::fs::read_to_string("assets/template.html").unwrap();

    let bib: Bibliography = bib_source.parse().unwrap();
    assert_eq!(bib.len(), 3);

    let template = Template::new(template_source).unwrap();
    let config = RenderConfig {
        newer: Some("newer entries".into()),
        older: Some("older entries".into()),
        date: Some(NaiveDate::from_ymd_opt(2021, 2, 1).unwrap()),
    };
    let html = render(&bib, &template, &config);

    assert!(html.contains("Number of references: 3."));
    assert!(html.contains("<p>newer entries older entries</p>"));
    assert!(html.contains("Last updated on 01 Feb 2021."));

    // the @string venue macro expands in both entries that use it
    assert_eq!(html.matches("Proceedings of the Example Conference").count(), 2);
    // accents become entities, pages collapse, urls become anchors
    assert!(html.contains("Doe, Jane and M&uuml;ller, Sven."));
    assert!(html.contains("Garc&iacute;a, Ana."));
    assert!(html.contains(", pp. 101-110."));
    assert!(html.contains("<a href=\"https://example.org/doe2020\">[link]</a>"));
}

#[test]
fn test_rendered_count_round_trips() {
    let bib: Bibliography = TWO_ENTRIES.parse().unwrap();
    let html = render(&bib, &minimal_template(), &fixed_date());
    // the visible list item count matches the substituted reference count
    assert_eq!(html.matches("<li id=").count(), bib.len());
}
