//! Owned representations of parsed bibliography entries.

use serde::ser::{Serialize, SerializeMap, Serializer};
use unicase::Ascii;

use crate::abbrev::MacroDictionary;
use crate::error::SyntaxError;
use crate::parse::RawEntry;

/// One bibliographic record: entry type, citation key, and fields.
///
/// Immutable once parsed. The entry type is stored lowercased; field name
/// lookup is ASCII-case-insensitive.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Entry {
    pub entry_type: String,
    pub key: String,
    pub fields: Fields,
}

impl Entry {
    pub(crate) fn from_raw(
        raw: RawEntry<'_>,
        macros: &MacroDictionary,
    ) -> Result<Self, SyntaxError> {
        let mut fields = Fields::default();
        for field in &raw.fields {
            fields.insert(field.key, macros.resolve(&field.value)?);
        }
        Ok(Entry {
            entry_type: raw.entry_type.to_lowercase(),
            key: raw.key.to_string(),
            fields,
        })
    }

    /// Field lookup, ignoring ASCII case of the field name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)
    }
}

/// The fields of an entry, in source order.
///
/// A duplicate field name within one entry overwrites the earlier value but
/// keeps the first occurrence's position.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fields(Vec<(Ascii<String>, String)>);

impl Fields {
    pub(crate) fn insert(&mut self, name: &str, value: String) {
        let name = Ascii::new(name.to_string());
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = Ascii::new(name);
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(key, value)| (AsRef::<str>::as_ref(key), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Fields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(AsRef::<str>::as_ref(key), value)?;
        }
        map.end()
    }
}
