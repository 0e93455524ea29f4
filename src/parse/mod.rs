//! A single-pass, non-restartable reader over the events of a BibTeX file.
//!
//! [`BibReader`] borrows the source text and yields [`Event`]s: regular
//! entries, `@string` macro definitions, `@comment`s, and `@preamble`s.
//! Text between entries is junk and skipped. All field values are returned
//! as raw token sequences with the delimiters stripped; macro resolution
//! happens later, in [`crate::bibliography`].

mod scan;

use unicase::UniCase;

use crate::error::{EntryId, ParseError, SyntaxError};

/// One `#`-concatenated piece of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken<'r> {
    /// Text with the `{...}` or `"..."` delimiters stripped, or a bare number.
    Text(&'r str),
    /// A reference to an `@string` variable.
    Macro(&'r str),
}

/// A `key = value` pair inside an entry body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField<'r> {
    pub key: &'r str,
    pub value: Vec<RawToken<'r>>,
}

/// A regular entry, e.g. `@article{key, ...}`, borrowed from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry<'r> {
    pub entry_type: &'r str,
    pub key: &'r str,
    pub fields: Vec<RawField<'r>>,
}

/// A single bibliography event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'r> {
    Entry(RawEntry<'r>),
    /// An `@string{var = value}` macro definition.
    Macro(&'r str, Vec<RawToken<'r>>),
    Comment(&'r str),
    Preamble(Vec<RawToken<'r>>),
}

enum EntryKind {
    Preamble,
    Comment,
    Macro,
    Regular,
}

fn classify(entry_type: &str) -> EntryKind {
    let uni = UniCase::unicode(entry_type);
    if uni == UniCase::ascii("string") {
        EntryKind::Macro
    } else if uni == UniCase::ascii("comment") {
        EntryKind::Comment
    } else if uni == UniCase::ascii("preamble") {
        EntryKind::Preamble
    } else {
        EntryKind::Regular
    }
}

/// Reader for lower-level document parsing.
#[derive(Debug)]
pub struct BibReader<'r> {
    input: &'r str,
    pos: usize,
    entry_index: usize,
    current_key: Option<&'r str>,
    in_entry: bool,
    errored: bool,
}

impl<'r> BibReader<'r> {
    pub fn new(input: &'r str) -> Self {
        BibReader {
            input,
            pos: 0,
            entry_index: 0,
            current_key: None,
            in_entry: false,
            errored: false,
        }
    }

    /// The current byte offset into the input.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Identifies the entry currently being parsed, if any.
    pub(crate) fn entry_id(&self) -> Option<EntryId> {
        match self.current_key {
            Some(key) => Some(EntryId::Key(key.to_string())),
            None if self.in_entry => Some(EntryId::Index(self.entry_index)),
            None => None,
        }
    }

    fn err(&self, code: SyntaxError) -> ParseError {
        let err = ParseError::new(code, self.pos);
        match self.entry_id() {
            Some(id) => err.in_entry(id),
            None => err,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_ignored(&mut self) {
        self.pos = scan::skip_ignored(self.input, self.pos);
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        self.skip_ignored();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.err(SyntaxError::Expected(byte as char)))
        }
    }

    fn identifier(&mut self) -> Result<&'r str, ParseError> {
        self.skip_ignored();
        let (end, ident) = scan::identifier(self.input, self.pos).map_err(|code| self.err(code))?;
        self.pos = end;
        Ok(ident)
    }

    /// Parse the opening bracket of an entry body and return the matching
    /// closing bracket.
    fn open(&mut self) -> Result<u8, ParseError> {
        self.skip_ignored();
        match self.peek() {
            Some(b'{') => {
                self.pos += 1;
                Ok(b'}')
            }
            Some(b'(') => {
                self.pos += 1;
                Ok(b')')
            }
            _ => Err(self.err(SyntaxError::ExpectedOpeningBracket)),
        }
    }

    fn token(&mut self) -> Result<RawToken<'r>, ParseError> {
        self.skip_ignored();
        match self.peek() {
            Some(b'{') => {
                self.pos += 1;
                let (end, text) =
                    scan::balanced(self.input, self.pos).map_err(|code| self.err(code))?;
                self.pos = end + 1; // consume the closing brace
                Ok(RawToken::Text(text))
            }
            Some(b'"') => {
                self.pos += 1;
                let (end, text) =
                    scan::protected(self.input, self.pos, b'"').map_err(|code| self.err(code))?;
                self.pos = end + 1; // consume the closing quote
                Ok(RawToken::Text(text))
            }
            Some(byte) if byte.is_ascii_digit() => {
                let (end, num) =
                    scan::number(self.input, self.pos).map_err(|code| self.err(code))?;
                self.pos = end;
                Ok(RawToken::Text(num))
            }
            _ => match scan::identifier(self.input, self.pos) {
                Ok((end, ident)) => {
                    self.pos = end;
                    Ok(RawToken::Macro(ident))
                }
                Err(_) => Err(self.err(SyntaxError::ExpectedToken)),
            },
        }
    }

    /// Parse a field value: tokens separated by `#`.
    fn value(&mut self) -> Result<Vec<RawToken<'r>>, ParseError> {
        let mut tokens = vec![self.token()?];
        loop {
            self.skip_ignored();
            if self.peek() == Some(b'#') {
                self.pos += 1;
                tokens.push(self.token()?);
            } else {
                return Ok(tokens);
            }
        }
    }

    /// Parse the `{...}` or `(...)` body of an `@comment`.
    fn comment_body(&mut self) -> Result<&'r str, ParseError> {
        let close = self.open()?;
        let (end, text) = match close {
            b'}' => scan::balanced(self.input, self.pos),
            _ => scan::protected(self.input, self.pos, b')'),
        }
        .map_err(|code| self.err(code))?;
        self.pos = end + 1; // consume the closing bracket
        Ok(text)
    }

    fn entry_body(&mut self, entry_type: &'r str) -> Result<RawEntry<'r>, ParseError> {
        let close = self.open()?;
        self.skip_ignored();

        let (end, key) = scan::key_chars(self.input, self.pos);
        if key.is_empty() {
            return Err(self.err(SyntaxError::MissingCitationKey));
        }
        self.pos = end;
        self.current_key = Some(key);

        let mut fields = Vec::new();
        loop {
            self.skip_ignored();
            match self.peek() {
                Some(byte) if byte == close => {
                    self.pos += 1;
                    break;
                }
                Some(b',') => {
                    self.pos += 1;
                    self.skip_ignored();
                    // trailing comma before the closing bracket
                    if self.peek() == Some(close) {
                        self.pos += 1;
                        break;
                    }
                    let field_key = self.identifier()?;
                    self.expect(b'=')?;
                    let value = self.value()?;
                    fields.push(RawField {
                        key: field_key,
                        value,
                    });
                }
                Some(_) => return Err(self.err(SyntaxError::Expected(','))),
                None => return Err(self.err(SyntaxError::UnexpectedEof)),
            }
        }

        Ok(RawEntry {
            entry_type,
            key,
            fields,
        })
    }

    /// Parse the next event, or `None` at the end of input.
    pub fn next_event(&mut self) -> Result<Option<Event<'r>>, ParseError> {
        self.current_key = None;
        self.in_entry = false;

        let (pos, found) = scan::next_entry_or_eof(self.input, self.pos);
        self.pos = pos;
        if !found {
            return Ok(None);
        }

        let entry_type = self.identifier()?;
        let event = match classify(entry_type) {
            EntryKind::Comment => Event::Comment(self.comment_body()?),
            EntryKind::Preamble => {
                let close = self.open()?;
                let tokens = self.value()?;
                self.expect(close)?;
                Event::Preamble(tokens)
            }
            EntryKind::Macro => {
                let close = self.open()?;
                let name = self.identifier()?;
                self.expect(b'=')?;
                let tokens = self.value()?;
                self.skip_ignored();
                if self.peek() == Some(b',') {
                    self.pos += 1;
                }
                self.expect(close)?;
                Event::Macro(name, tokens)
            }
            EntryKind::Regular => {
                self.in_entry = true;
                let entry = self.entry_body(entry_type)?;
                self.current_key = None;
                self.in_entry = false;
                self.entry_index += 1;
                Event::Entry(entry)
            }
        };
        Ok(Some(event))
    }
}

/// The reader is a lazy, finite sequence of events. After an error it is
/// fused: further calls return `None`.
impl<'r> Iterator for BibReader<'r> {
    type Item = Result<Event<'r>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => None,
            Err(err) => {
                self.errored = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawToken<'_> {
        RawToken::Text(s)
    }

    #[test]
    fn test_entry() {
        let input = r#"
          @article{key:0,
            author = A1 # " and " # A2,
            title = {A title},
            year = 2014,
          }"#;
        let mut reader = BibReader::new(input);
        let event = reader.next_event().unwrap().unwrap();
        assert_eq!(
            event,
            Event::Entry(RawEntry {
                entry_type: "article",
                key: "key:0",
                fields: vec![
                    RawField {
                        key: "author",
                        value: vec![RawToken::Macro("A1"), text(" and "), RawToken::Macro("A2")],
                    },
                    RawField {
                        key: "title",
                        value: vec![text("A title")],
                    },
                    RawField {
                        key: "year",
                        value: vec![text("2014")],
                    },
                ],
            })
        );
        assert_eq!(reader.next_event(), Ok(None));
    }

    #[test]
    fn test_round_entry_body() {
        let input = "@misc(key2020, note = \"quoted {\"} text\")";
        let mut reader = BibReader::new(input);
        let event = reader.next_event().unwrap().unwrap();
        assert_eq!(
            event,
            Event::Entry(RawEntry {
                entry_type: "misc",
                key: "key2020",
                fields: vec![RawField {
                    key: "note",
                    value: vec![text("quoted {\"} text")],
                }],
            })
        );
    }

    #[test]
    fn test_special_entries() {
        let input = r#"
          @string{A = "Author"}
          @COMMENT{name@gmail.com {Author One}}
          @preamble{"\mymacro{x}" # A}
          junk in between
          @book{key, title = {T}}"#;
        let mut reader = BibReader::new(input);
        assert_eq!(
            reader.next_event().unwrap(),
            Some(Event::Macro("A", vec![text("Author")]))
        );
        assert_eq!(
            reader.next_event().unwrap(),
            Some(Event::Comment("name@gmail.com {Author One}")),
        );
        assert_eq!(
            reader.next_event().unwrap(),
            Some(Event::Preamble(vec![
                text("\\mymacro{x}"),
                RawToken::Macro("A"),
            ]))
        );
        assert!(matches!(
            reader.next_event().unwrap(),
            Some(Event::Entry(RawEntry { key: "key", .. }))
        ));
        assert_eq!(reader.next_event(), Ok(None));
    }

    #[test]
    fn test_unterminated_value() {
        let input = "@article{doe2020,\n  title = {Unterminated";
        let mut reader = BibReader::new(input);
        let err = reader.next_event().unwrap_err();
        assert_eq!(err.code, SyntaxError::UnterminatedTextToken);
        assert_eq!(err.entry, Some(EntryId::Key("doe2020".into())));
    }

    #[test]
    fn test_missing_citation_key() {
        let mut reader = BibReader::new("@article{, title = {T}}");
        let err = reader.next_event().unwrap_err();
        assert_eq!(err.code, SyntaxError::MissingCitationKey);
        assert_eq!(err.entry, Some(EntryId::Index(0)));
    }

    #[test]
    fn test_bad_entry_type() {
        let mut reader = BibReader::new("@{key, title = {T}}");
        let err = reader.next_event().unwrap_err();
        assert_eq!(err.code, SyntaxError::ExpectedIdentifier);
    }

    #[test]
    fn test_fused_after_error() {
        let mut reader = BibReader::new("@article{a, x = {open}@article{b, y = 1}");
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_trailing_comma_and_comments() {
        let input = "@article{key, % a comment with , = and {\n  year = 2020,\n}";
        let mut reader = BibReader::new(input);
        let event = reader.next_event().unwrap().unwrap();
        assert_eq!(
            event,
            Event::Entry(RawEntry {
                entry_type: "article",
                key: "key",
                fields: vec![RawField {
                    key: "year",
                    value: vec![text("2020")],
                }],
            })
        );
    }
}
