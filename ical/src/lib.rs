// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Streaming iCalendar transcoding.
//!
//! Chunked RFC 5545 input is unfolded, parsed into a component tree one
//! calendar at a time, filtered by the end instants of its events and
//! written back as iCalendar, xCal (RFC 6321) or jCal (RFC 7265).
//!
//! ```
//! use calfilter_ical::{FilterMode, OutputFormat, SessionOptions, transcode};
//!
//! let input = b"BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
//! let mut options = SessionOptions::new(jiff::Timestamp::UNIX_EPOCH);
//! options.output = OutputFormat::Jcal;
//! options.filter = FilterMode::None;
//!
//! let out = transcode(input, Vec::new(), options).unwrap();
//! assert_eq!(out, br#"["vcalendar",[["version",{},"text","2.0"]],[]]"#);
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

pub mod builder;
pub mod component;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod keyword;
mod kind;
pub mod parameter;
pub mod property;
pub mod syntax;
pub mod transcode;
pub mod unfold;
pub mod value;

pub use crate::builder::Builder;
pub use crate::component::{Component, ComponentKind};
pub use crate::error::{ParseOptionError, TranscodeError};
pub use crate::filter::{FilterMode, filter};
pub use crate::formatter::Formatting;
pub use crate::parameter::{Parameter, ParameterKind};
pub use crate::property::{Property, PropertyKind};
pub use crate::syntax::{ContentLine, ContentLineError, ContentParameter, parse_content_line};
pub use crate::transcode::{
    CONTENT_TYPE_ICAL, CONTENT_TYPE_JCAL, CONTENT_TYPE_XCAL, OutputFormat, Session,
    SessionOptions, transcode, transcode_to_vec,
};
pub use crate::unfold::{Unfolder, unfold};
pub use crate::value::{
    DateOrDateTime, DateTimePeriod, Geo, RecurrenceFrequency, RequestStatus, Trigger, Value,
    ValueDate, ValueDateTime, ValueDuration, ValueKind, ValuePeriod, ValueRecurrenceRule,
    ValueTime, ValueUtcOffset, WeekDay, WeekDayNum,
};
