// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scalar and structured values as defined in RFC 5545 Section 3.3 and 3.8.

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::keyword::{KW_BOOLEAN_FALSE, KW_BOOLEAN_TRUE};
use crate::value::Extra;

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// binary     = *(4b-char) [b-end]
/// ; A "BASE64" encoded character string, as defined by [RFC4648].
///
/// b-end      = (2b-char "==") / (3b-char "=")
///
/// b-char = ALPHA / DIGIT / "+" / "/"
/// ```
pub(crate) fn value_binary<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    // b-char = ALPHA / DIGIT / "+" / "/"
    let b_char = select! {
        'A'..='Z' => (),
        'a'..='z' => (),
        '0'..='9' => (),
        '+' => (),
        '/' => (),
    };

    let quartet = b_char.repeated().exactly(4).ignored();

    // b-end = (2b-char "==") / (3b-char "=")
    let b_end = b_char
        .repeated()
        .exactly(2)
        .ignored()
        .then_ignore(just("=="))
        .or(b_char.repeated().exactly(3).ignored().then_ignore(just('=')))
        .ignored();

    quartet.repeated().ignore_then(b_end.or_not()).ignored()
}

/// ```txt
/// boolean    = "TRUE" / "FALSE"
/// ```
///
/// These values are case-insensitive text.
pub(crate) fn parse_boolean(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case(KW_BOOLEAN_TRUE) {
        Some(true)
    } else if raw.eq_ignore_ascii_case(KW_BOOLEAN_FALSE) {
        Some(false)
    } else {
        None
    }
}

/// ```txt
/// integer    = (["+"] / "-") 1*DIGIT
/// ```
pub(crate) fn parse_integer(raw: &str) -> Option<i32> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    lexical::parse::<i32, _>(raw.strip_prefix('+').unwrap_or(raw)).ok()
}

/// ```txt
/// float      = (["+"] / "-") 1*DIGIT ["." 1*DIGIT]
/// ```
pub(crate) fn parse_float(raw: &str) -> Option<f64> {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int) || frac.is_some_and(|frac| !is_digits(frac)) {
        return None;
    }

    lexical::parse::<f64, _>(raw.strip_prefix('+').unwrap_or(raw))
        .ok()
        .filter(|f| f.is_finite())
}

/// Geographic position, the value of the GEO property.
///
/// ```txt
/// geovalue   = float ";" float
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geo {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,
}

impl Geo {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        let (lat, lon) = raw.split_once(';')?;
        Some(Self {
            latitude: parse_float(lat.trim())?,
            longitude: parse_float(lon.trim())?,
        })
    }
}

impl Display for Geo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.latitude, self.longitude)
    }
}

/// Status of a scheduling request, the value of REQUEST-STATUS.
///
/// ```txt
/// rstatus    = statcode ";" statdesc [";" extdata]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestStatus {
    /// Hierarchical status code, e.g. `2.0`
    pub code: String,

    /// Status description, unescaped
    pub description: String,

    /// Exception data, unescaped
    pub data: Option<String>,
}

impl RequestStatus {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        let (code, rest) = split_once_unescaped(raw, ';')?;
        let code = code.trim();
        let valid_code = !code.is_empty()
            && code
                .split('.')
                .all(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
        if !valid_code {
            return None;
        }

        // extdata may itself contain semicolons
        let (description, data) = match split_once_unescaped(rest, ';') {
            Some((description, data)) => (description, Some(unescape_text(data))),
            None => (rest, None),
        };
        Some(Self {
            code: code.to_owned(),
            description: unescape_text(description),
            data,
        })
    }
}

impl Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.code, escape_text(&self.description))?;
        if let Some(data) = &self.data {
            write!(f, ";{}", escape_text(data))?;
        }
        Ok(())
    }
}

/// Split at the first `sep` not preceded by a backslash escape.
fn split_once_unescaped(raw: &str, sep: char) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in raw.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            c if c == sep && !escaped => return Some((raw.get(..i)?, raw.get(i + c.len_utf8()..)?)),
            _ => escaped = false,
        }
    }
    None
}

/// Split on every `sep` not preceded by a backslash escape.
pub(crate) fn split_unescaped(raw: &str, sep: char) -> impl Iterator<Item = &str> {
    let mut rest = Some(raw);
    std::iter::from_fn(move || {
        let s = rest?;
        match split_once_unescaped(s, sep) {
            Some((head, tail)) => {
                rest = Some(tail);
                Some(head)
            }
            None => {
                rest = None;
                Some(s)
            }
        }
    })
}

/// Decode the backslash escapes of a TEXT value (RFC 5545 Section 3.3.11).
#[must_use]
pub fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(c @ ('\\' | ';' | ',')) => out.push(c),
            // not a defined escape, keep it as written
            Some(c) => {
                out.push('\\');
                out.push(c);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Encode a TEXT value with backslash escapes (RFC 5545 Section 3.3.11).
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}
