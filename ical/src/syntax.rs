// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Content line syntax.
//!
//! Per RFC 5545, an unfolded content line has the format:
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! param       = param-name "=" param-value *("," param-value)
//! ```
//!
//! The name and parameters are tokenized with logos. Everything after the
//! first colon that is not inside a quoted parameter value is the raw value,
//! taken verbatim from the source.

use logos::Logos;

#[derive(Debug, PartialEq, Eq, Clone, Copy, logos::Logos)]
enum Token<'a> {
    /// Runs of anything that is not a delimiter.
    #[regex(r#"[^;:,="]+"#)]
    Word(&'a str),

    /// Semicolon (;)
    #[token(";")]
    Semi,

    /// Colon (:)
    #[token(":")]
    Colon,

    /// Equal sign (=)
    #[token("=")]
    Eq,

    /// Comma (,)
    #[token(",")]
    Comma,

    /// Quoted strings (including quotes)
    #[regex(r#""[^"]*""#)]
    Quoted(&'a str),
}

/// A decoded content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name as written (e.g., "DTSTART", "x-wr-calname")
    pub name: String,

    /// Parameters in source order
    pub parameters: Vec<ContentParameter>,

    /// Raw value, everything after the separating colon
    pub value: String,
}

/// A parameter of a content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentParameter {
    /// Parameter name as written
    pub name: String,

    /// Values, with surrounding quotes removed
    pub values: Vec<String>,
}

/// Errors that can occur when decoding a content line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentLineError {
    /// The line has no name before its first delimiter.
    #[error("content line has no name")]
    EmptyName,

    /// No colon separates the name and parameters from the value.
    #[error("missing colon in content line")]
    MissingColon,

    /// A parameter has no equals sign after its name.
    #[error("missing equals in parameter '{0}'")]
    MissingEquals(String),

    /// A parameter has no name.
    #[error("empty parameter name")]
    EmptyParameterName,

    /// A quoted parameter value is not terminated.
    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

/// Decode one unfolded content line.
///
/// # Errors
///
/// Returns an error when the line does not follow the content line grammar.
pub fn parse_content_line(src: &str) -> Result<ContentLine, ContentLineError> {
    let mut lexer = Token::lexer(src);

    let name = match lexer.next() {
        Some(Ok(Token::Word(word))) if !word.trim().is_empty() => word.trim(),
        Some(Ok(Token::Colon | Token::Semi)) => return Err(ContentLineError::EmptyName),
        _ => return Err(ContentLineError::MissingColon),
    };

    let mut parameters = Vec::new();
    let mut terminator = lexer.next();
    loop {
        match terminator {
            Some(Ok(Token::Colon)) => {
                let value = src.get(lexer.span().end..).unwrap_or_default();
                return Ok(ContentLine {
                    name: name.to_owned(),
                    parameters,
                    value: value.to_owned(),
                });
            }
            Some(Ok(Token::Semi)) => {
                let (parameter, next) = parse_parameter(&mut lexer)?;
                parameters.push(parameter);
                terminator = next;
            }
            Some(Err(())) => return Err(ContentLineError::UnterminatedQuote),
            _ => return Err(ContentLineError::MissingColon),
        }
    }
}

type Next<'a> = Option<Result<Token<'a>, ()>>;

/// Parse `name=value[,value...]` after a semicolon, returning the token that
/// ended it.
fn parse_parameter<'a>(
    lexer: &mut logos::Lexer<'a, Token<'a>>,
) -> Result<(ContentParameter, Next<'a>), ContentLineError> {
    let name = match lexer.next() {
        Some(Ok(Token::Word(word))) if !word.trim().is_empty() => word.trim().to_owned(),
        Some(Ok(Token::Eq)) => return Err(ContentLineError::EmptyParameterName),
        Some(Err(())) => return Err(ContentLineError::UnterminatedQuote),
        _ => return Err(ContentLineError::EmptyParameterName),
    };

    match lexer.next() {
        Some(Ok(Token::Eq)) => {}
        Some(Err(())) => return Err(ContentLineError::UnterminatedQuote),
        _ => return Err(ContentLineError::MissingEquals(name)),
    }

    let mut values = Vec::new();
    let mut pending = String::new();
    loop {
        match lexer.next() {
            Some(Ok(Token::Quoted(quoted))) => {
                let inner = quoted
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .unwrap_or(quoted);
                pending.push_str(inner);
            }
            // '=' is a legal SAFE-CHAR inside an unquoted value
            Some(Ok(Token::Word(word))) => pending.push_str(word),
            Some(Ok(Token::Eq)) => pending.push('='),
            Some(Ok(Token::Comma)) => values.push(std::mem::take(&mut pending)),
            next @ Some(Ok(Token::Semi | Token::Colon)) => {
                values.push(pending);
                return Ok((ContentParameter { name, values }, next));
            }
            Some(Err(())) => return Err(ContentLineError::UnterminatedQuote),
            None => return Err(ContentLineError::MissingColon),
        }
    }
}
