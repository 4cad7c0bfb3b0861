// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Serializers from the component tree to iCalendar, xCal and jCal.
//!
//! Each serializer writes one complete document per calendar to any
//! `std::io::Write` implementer. Values are rendered through the shared
//! table in [`crate::encoding`].
//!
//! # Example
//!
//! ```ignore
//! use calfilter_ical::formatter::{Formatting, jcal};
//!
//! let mut out = Vec::new();
//! jcal::write_calendar(&mut out, &calendar, Formatting::Pretty)?;
//! ```

pub mod ical;
pub mod jcal;
pub mod xcal;

use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::error::ParseOptionError;

/// Whitespace applied by the xCal and jCal serializers.
///
/// Only whitespace differs between the modes, never structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Formatting {
    /// No whitespace between tokens.
    #[default]
    None,

    /// A space after separators in jCal, indented xCal.
    Spaced,

    /// Indented, two spaces per level.
    Pretty,
}

impl FromStr for Formatting {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|format| format.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError::new("format", s, "none, spaced, pretty"))
    }
}
