//! Convert a BibTeX bibliography to an HTML reference list.
//!
//! The crate is a single-pass text converter: [`Bibliography`] parses one
//! BibTeX file into entries in source order, and [`render`] substitutes the
//! five placeholder tokens of a [`Template`] with the reference count,
//! navigation text, the date, and the formatted reference list.
//!
//! ```
//! use bibtex2html::{Bibliography, RenderConfig, Template};
//!
//! let bib: Bibliography = r#"
//!     @article{doe2020,
//!         author = {Doe, Jane and Lee, Kim},
//!         title = {An example},
//!         year = 2020,
//!     }"#
//!     .parse()?;
//! assert_eq!(bib.len(), 1);
//!
//! let template = Template::new(
//!     "<!--NUMBER_OF_REFERENCES--> references <!--NEWER--> <!--OLDER--> \
//!      <!--DATE--> <!--LIST_OF_REFERENCES-->",
//! )?;
//! let html = bibtex2html::render(&bib, &template, &RenderConfig::default());
//! assert!(html.starts_with("1 references"));
//! # Ok::<(), bibtex2html::Error>(())
//! ```

/// The `@string` macro dictionary.
pub mod abbrev;

/// The parsed document and its entries.
pub mod bibliography;
pub mod entry;

/// Error types for parsing and rendering.
pub mod error;

/// Fundamental parsers.
pub mod parse;

/// Template substitution and reference formatting.
pub mod render;

// re-exports
pub use abbrev::MacroDictionary;
pub use bibliography::Bibliography;
pub use entry::{Entry, Fields};
pub use error::{Error, ParseError, RenderError, Result};
pub use render::{RenderConfig, Template, render};
