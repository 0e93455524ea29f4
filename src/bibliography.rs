//! An ordered collection of entries parsed from one source file.

use std::str::FromStr;

use crate::abbrev::MacroDictionary;
use crate::entry::Entry;
use crate::error::{EntryId, ParseError};
use crate::parse::{BibReader, Event};

/// The regular entries of a BibTeX file, in source order.
///
/// `@string` definitions encountered during the pass populate the macro
/// dictionary; `@comment` and `@preamble` chunks are parsed and discarded.
/// Duplicate citation keys are not rejected.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Bibliography {
    pub entries: Vec<Entry>,
}

impl Bibliography {
    /// Parse with an explicit starting macro dictionary.
    pub fn from_str_with_macros(
        input: &str,
        mut macros: MacroDictionary,
    ) -> Result<Self, ParseError> {
        let mut entries = Vec::new();
        let mut reader = BibReader::new(input);
        while let Some(event) = reader.next_event()? {
            match event {
                Event::Entry(raw) => {
                    let key = raw.key.to_string();
                    let entry = Entry::from_raw(raw, &macros).map_err(|code| {
                        ParseError::new(code, reader.offset()).in_entry(EntryId::Key(key))
                    })?;
                    entries.push(entry);
                }
                Event::Macro(name, tokens) => {
                    let value = macros
                        .resolve(&tokens)
                        .map_err(|code| ParseError::new(code, reader.offset()))?;
                    macros.set(name, value);
                }
                Event::Comment(_) | Event::Preamble(_) => {}
            }
        }
        tracing::debug!(entries = entries.len(), "parsed bibliography");
        Ok(Bibliography { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl FromStr for Bibliography {
    type Err = ParseError;

    /// Parse with the standard month macros preloaded.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::from_str_with_macros(input, MacroDictionary::with_month_macros())
    }
}

impl<'b> IntoIterator for &'b Bibliography {
    type Item = &'b Entry;
    type IntoIter = std::slice::Iter<'b, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
