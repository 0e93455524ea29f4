//! Error types for parsing and rendering.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Any failure a conversion can produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Possible syntax errors in BibTeX input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Expected an identifier; found none.
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Identifiers other than citation keys cannot start with an ASCII digit.
    #[error("identifier cannot start with a digit")]
    IdentifierStartsWithDigit,
    /// Expected a specific delimiter character.
    #[error("expected '{0}'")]
    Expected(char),
    /// Expected `{` or `(` opening an entry body.
    #[error("expected '{{' or '('")]
    ExpectedOpeningBracket,
    /// Expected a `{curly}`, `"quoted"`, number, or macro token.
    #[error("expected a field value token")]
    ExpectedToken,
    /// A text token with an unclosed `{`.
    #[error("unterminated text token")]
    UnterminatedTextToken,
    /// A text token with an extra closing `}`.
    #[error("unexpected closing bracket")]
    UnexpectedClosingBracket,
    /// An entry without a citation key.
    #[error("missing citation key")]
    MissingCitationKey,
    /// The input ended inside an entry.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A value references a macro with no `@string` definition.
    #[error("unresolved macro '{0}'")]
    UnresolvedMacro(String),
}

/// Identifies the entry in which a parse error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryId {
    /// Zero-based position in the source file, for errors before the
    /// citation key has been read.
    Index(usize),
    /// The entry's citation key.
    Key(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Index(idx) => write!(f, "#{idx}"),
            EntryId::Key(key) => write!(f, "'{key}'"),
        }
    }
}

/// A syntax error together with the byte offset at which it occurred and,
/// when known, the entry being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub code: SyntaxError,
    pub offset: usize,
    pub entry: Option<EntryId>,
}

impl ParseError {
    pub(crate) fn new(code: SyntaxError, offset: usize) -> Self {
        ParseError {
            code,
            offset,
            entry: None,
        }
    }

    pub(crate) fn in_entry(mut self, id: EntryId) -> Self {
        self.entry = Some(id);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry {
            Some(id) => write!(
                f,
                "syntax error at byte {} in entry {}: {}",
                self.offset, id, self.code
            ),
            None => write!(f, "syntax error at byte {}: {}", self.offset, self.code),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.code)
    }
}

/// Errors produced while rendering a bibliography into a template.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The template does not contain a required placeholder token.
    #[error("template is missing required placeholder '{0}'")]
    MissingPlaceholder(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(SyntaxError::UnterminatedTextToken, 42);
        assert_eq!(
            err.to_string(),
            "syntax error at byte 42: unterminated text token"
        );

        let err = err.in_entry(EntryId::Key("doe2020".into()));
        assert_eq!(
            err.to_string(),
            "syntax error at byte 42 in entry 'doe2020': unterminated text token"
        );

        let err = ParseError::new(SyntaxError::MissingCitationKey, 7).in_entry(EntryId::Index(2));
        assert_eq!(
            err.to_string(),
            "syntax error at byte 7 in entry #2: missing citation key"
        );
    }

    #[test]
    fn test_render_error_display() {
        assert_eq!(
            RenderError::MissingPlaceholder("<!--DATE-->").to_string(),
            "template is missing required placeholder '<!--DATE-->'"
        );
    }
}
