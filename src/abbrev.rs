//! The `@string` macro dictionary.

use std::collections::HashMap;

use unicase::UniCase;

use crate::error::SyntaxError;
use crate::parse::RawToken;

/// A case-insensitive mapping from `@string` variables to their replacement
/// text. Definitions are collected in source order during the single parse
/// pass, so a macro must be defined before it is used.
#[derive(Debug, Default, Clone)]
pub struct MacroDictionary(HashMap<UniCase<String>, String>);

impl MacroDictionary {
    /// A dictionary preloaded with the standard month macros.
    pub fn with_month_macros() -> Self {
        let mut macros = Self::default();
        macros.set_month_macros();
        macros
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(UniCase::new(name.to_string()), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(&UniCase::new(name.to_string()))
            .map(String::as_str)
    }

    /// Define the conventional three-letter month macros, `jan` through
    /// `dec`, expanding to the full English month names.
    pub fn set_month_macros(&mut self) {
        static MONTHS: [(&str, &str); 12] = [
            ("jan", "January"),
            ("feb", "February"),
            ("mar", "March"),
            ("apr", "April"),
            ("may", "May"),
            ("jun", "June"),
            ("jul", "July"),
            ("aug", "August"),
            ("sep", "September"),
            ("oct", "October"),
            ("nov", "November"),
            ("dec", "December"),
        ];
        for (name, month) in MONTHS {
            self.set(name, month);
        }
    }

    /// Concatenate a token sequence, expanding macro references.
    pub(crate) fn resolve(&self, tokens: &[RawToken<'_>]) -> Result<String, SyntaxError> {
        let mut out = String::new();
        for token in tokens {
            match token {
                RawToken::Text(text) => out.push_str(text),
                RawToken::Macro(name) => match self.get(name) {
                    Some(value) => out.push_str(value),
                    None => return Err(SyntaxError::UnresolvedMacro((*name).to_string())),
                },
            }
        }
        Ok(out)
    }
}
