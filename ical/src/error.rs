// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Error types of the transcoding pipeline.

use std::io;

/// Errors that abort the current document.
///
/// Malformed calendar input never ends up here: unknown kinds and values
/// that fail their grammar are kept as vendor or unknown variants instead.
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    /// The output sink rejected a write, also as seen through the XML writer.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// The JSON serializer failed.
    #[error("failed to write jCal document: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<TranscodeError> for io::Error {
    fn from(err: TranscodeError) -> Self {
        match err {
            TranscodeError::Io(err) => err,
            TranscodeError::Json(err) => err.into(),
        }
    }
}

/// Error returned when parsing an option name such as a filter mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {option} '{value}', expected one of: {expected}")]
pub struct ParseOptionError {
    /// Which option was being parsed.
    pub option: &'static str,

    /// The rejected input.
    pub value: String,

    /// The accepted names, comma separated.
    pub expected: &'static str,
}

impl ParseOptionError {
    pub(crate) fn new(option: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            option,
            value: value.to_owned(),
            expected,
        }
    }
}
