//! Low-level scanning primitives.
//!
//! Every function takes the input together with a byte position and returns
//! the position after the consumed text. Positions handed in must lie on a
//! char boundary; all functions stop at ASCII delimiter bytes, so the
//! positions they return are char boundaries as well.

use memchr::{memchr, memchr2, memchr2_iter, memchr3_iter};

use crate::error::SyntaxError;

/// Lookup table for bytes which may appear in an identifier or citation key.
/// This is the ascii printable characters with `{}(),= \t\n\\#%'"` removed,
/// as well as bytes that can appear in non-ascii UTF-8.
static IDENTIFIER_ALLOWED: [bool; 256] = {
    const PR: bool = false; // disallowed printable bytes
    const CT: bool = false; // non-printable ascii
    const __: bool = true; // permitted bytes
    [
        //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
        CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 0
        CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 1
        CT, __, PR, PR, __, PR, __, PR, PR, PR, __, __, PR, __, __, __, // 2
        __, __, __, __, __, __, __, __, __, __, __, __, __, PR, __, __, // 3
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
        __, __, __, __, __, __, __, __, __, __, __, __, PR, __, __, __, // 5
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
        __, __, __, __, __, __, __, __, __, __, __, PR, __, PR, __, CT, // 7
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
    ]
};

/// Discard junk characters between entries. Returns the position after the
/// next entry-opening `@` and whether one was found. A `%` starts a line
/// comment which hides any `@` on the rest of the line.
pub(crate) fn next_entry_or_eof(input: &str, mut pos: usize) -> (usize, bool) {
    let bytes = input.as_bytes();
    while let Some(found) = memchr2(b'@', b'%', &bytes[pos..]) {
        pos += found;
        if bytes[pos] == b'@' {
            return (pos + 1, true);
        }
        match memchr(b'\n', &bytes[pos..]) {
            Some(eol) => pos += eol + 1,
            None => return (bytes.len(), false),
        }
    }
    (bytes.len(), false)
}

/// Discard whitespace and `%` line comments.
pub(crate) fn skip_ignored(input: &str, mut pos: usize) -> usize {
    let bytes = input.as_bytes();
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos < bytes.len() && bytes[pos] == b'%' {
            match memchr(b'\n', &bytes[pos..]) {
                Some(eol) => pos += eol + 1,
                None => return bytes.len(),
            }
        } else {
            return pos;
        }
    }
}

/// Take the longest (possibly empty) run of identifier bytes. Citation keys
/// use this directly since they may start with a digit.
pub(crate) fn key_chars(input: &str, start: usize) -> (usize, &str) {
    let bytes = input.as_bytes();
    let mut end = start;
    while end < bytes.len() && IDENTIFIER_ALLOWED[bytes[end] as usize] {
        end += 1;
    }
    (end, &input[start..end])
}

/// Parse an identifier: a non-empty run of identifier bytes not starting
/// with an ASCII digit. Entry types, field keys, and macro variables are
/// identifiers.
pub(crate) fn identifier(input: &str, start: usize) -> Result<(usize, &str), SyntaxError> {
    let (end, ident) = key_chars(input, start);
    if ident.is_empty() {
        Err(SyntaxError::ExpectedIdentifier)
    } else if ident.as_bytes()[0].is_ascii_digit() {
        Err(SyntaxError::IdentifierStartsWithDigit)
    } else {
        Ok((end, ident))
    }
}

/// Parse a bare number token: one or more ASCII digits.
pub(crate) fn number(input: &str, start: usize) -> Result<(usize, &str), SyntaxError> {
    let bytes = input.as_bytes();
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == start {
        Err(SyntaxError::ExpectedToken)
    } else {
        Ok((end, &input[start..end]))
    }
}

/// Take text until the unmatched closing `}` which terminates a
/// brace-delimited token. Nested balanced braces are consumed; the closing
/// brace itself is not.
pub(crate) fn balanced(input: &str, pos: usize) -> Result<(usize, &str), SyntaxError> {
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    for found in memchr2_iter(b'{', b'}', &bytes[pos..]) {
        if bytes[pos + found] == b'{' {
            depth += 1;
        } else if depth == 0 {
            return Ok((pos + found, &input[pos..pos + found]));
        } else {
            depth -= 1;
        }
    }
    Err(SyntaxError::UnterminatedTextToken)
}

/// Take text until the `until` byte, with braces protecting it: a quote
/// inside `{...}` does not terminate a quote-delimited token. The braces
/// themselves must balance, and the terminating byte is not consumed.
pub(crate) fn protected(input: &str, pos: usize, until: u8) -> Result<(usize, &str), SyntaxError> {
    debug_assert!(until.is_ascii() && until != b'{' && until != b'}');
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    for found in memchr3_iter(b'{', b'}', until, &bytes[pos..]) {
        match bytes[pos + found] {
            b'{' => depth += 1,
            b'}' => {
                if depth == 0 {
                    return Err(SyntaxError::UnexpectedClosingBracket);
                }
                depth -= 1;
            }
            _ if depth == 0 => return Ok((pos + found, &input[pos..pos + found])),
            _ => {}
        }
    }
    Err(SyntaxError::UnterminatedTextToken)
}
