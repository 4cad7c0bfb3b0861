// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value type parsing module for iCalendar property values.
//!
//! This module handles the parsing and validation of iCalendar value types
//! as defined in RFC 5545 Section 3.3.

mod datetime;
mod duration;
mod miscellaneous;
mod period;
mod rrule;

pub use datetime::{DateOrDateTime, ValueDate, ValueDateTime, ValueTime, ValueUtcOffset};
pub use duration::ValueDuration;
pub use miscellaneous::{Geo, RequestStatus, escape_text, unescape_text};
pub use period::ValuePeriod;
pub use rrule::{MonthNum, RecurrenceFrequency, ValueRecurrenceRule, WeekDay, WeekDayNum};

pub(crate) use miscellaneous::split_unescaped;

use chumsky::prelude::*;

use crate::value::datetime::{value_date, value_date_time, value_time, value_utc_offset};
use crate::value::duration::value_duration;
use crate::value::miscellaneous::{parse_boolean, parse_float, parse_integer, value_binary};
use crate::value::period::value_period;
use crate::value::rrule::value_rrule;

/// Parser state shared by all value grammars.
pub(crate) type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Value data types defined in RFC 5545 Section 3.3, as named by `VALUE=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[strum(serialize_all = "SCREAMING-KEBAB-CASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum ValueKind {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    UtcOffset,
}

/// A typed property value.
///
/// The tag is chosen once, when the raw text is parsed, from the property's
/// declared or default value kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Base64 encoded binary, kept encoded
    Binary(String),

    /// TRUE or FALSE
    Boolean(bool),

    /// Calendar user address, usually a `mailto:` URI
    CalAddress(String),

    /// Date without time
    Date(ValueDate),

    /// Date with time of day
    DateTime(ValueDateTime),

    /// Length of time
    Duration(ValueDuration),

    /// Floating point number
    Float(f64),

    /// Signed 32-bit integer
    Integer(i32),

    /// Period of time
    Period(ValuePeriod),

    /// Recurrence rule
    Recur(ValueRecurrenceRule),

    /// Text, with escapes already decoded
    Text(String),

    /// Time of day
    Time(ValueTime),

    /// URI
    Uri(String),

    /// Offset from UTC
    UtcOffset(ValueUtcOffset),

    /// Date, date-time or period, as used by RDATE
    DateTimePeriod(DateTimePeriod),

    /// Alarm trigger, a relative duration or absolute date-time
    Trigger(Trigger),

    /// REQUEST-STATUS value
    RequestStatus(RequestStatus),

    /// GEO value
    Geo(Geo),

    /// Raw text of a value of unknown type, or that failed its grammar
    Unknown(String),
}

impl Value {
    /// Parse raw property text as the given value kind.
    ///
    /// Returns `None` when the text does not follow the kind's grammar.
    #[must_use]
    pub fn parse(kind: ValueKind, raw: &str) -> Option<Self> {
        fn run<'src, T>(
            parser: impl Parser<'src, &'src str, T, Extra<'src>>,
            raw: &'src str,
        ) -> Option<T> {
            parser.parse(raw).into_result().ok()
        }

        let value = match kind {
            ValueKind::Binary => {
                run(value_binary(), raw)?;
                Value::Binary(raw.to_owned())
            }
            ValueKind::Boolean => Value::Boolean(parse_boolean(raw)?),
            ValueKind::CalAddress => Value::CalAddress(raw.to_owned()),
            ValueKind::Date => Value::Date(run(value_date(), raw)?),
            ValueKind::DateTime => Value::DateTime(run(value_date_time(), raw)?),
            ValueKind::Duration => Value::Duration(run(value_duration(), raw)?),
            ValueKind::Float => Value::Float(parse_float(raw)?),
            ValueKind::Integer => Value::Integer(parse_integer(raw)?),
            ValueKind::Period => Value::Period(run(value_period(), raw)?),
            ValueKind::Recur => Value::Recur(run(value_rrule(), raw)?),
            ValueKind::Text => Value::Text(unescape_text(raw)),
            ValueKind::Time => Value::Time(run(value_time(), raw)?),
            ValueKind::Uri => Value::Uri(raw.to_owned()),
            ValueKind::UtcOffset => Value::UtcOffset(run(value_utc_offset(), raw)?),
        };
        Some(value)
    }

    /// The date or date-time carried by this value, if any.
    #[must_use]
    pub fn as_date_or_date_time(&self) -> Option<DateOrDateTime> {
        match self {
            Value::Date(date) => Some(DateOrDateTime::Date(*date)),
            Value::DateTime(date_time) => Some(DateOrDateTime::DateTime(*date_time)),
            Value::DateTimePeriod(DateTimePeriod::Time(time)) => Some(*time),
            _ => None,
        }
    }
}

/// The value of a property that accepts DATE, DATE-TIME or PERIOD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimePeriod {
    /// A single date or date-time
    Time(DateOrDateTime),

    /// A period of time
    Period(ValuePeriod),
}

/// The value of the TRIGGER property (RFC 5545 Section 3.8.6.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Relative to the start or end of the parent component
    Duration(ValueDuration),

    /// Absolute UTC date-time
    Time(ValueDateTime),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_value_kind_names() {
        assert_eq!("DATE-TIME".parse::<ValueKind>(), Ok(ValueKind::DateTime));
        assert_eq!("cal-address".parse::<ValueKind>(), Ok(ValueKind::CalAddress));
        assert_eq!("Utc-Offset".parse::<ValueKind>(), Ok(ValueKind::UtcOffset));
        assert!("X-CUSTOM".parse::<ValueKind>().is_err());
        assert_eq!(ValueKind::DateTime.to_string(), "DATE-TIME");
    }

    #[test]
    fn parses_by_kind() {
        assert_eq!(
            Value::parse(ValueKind::Text, r"a\, b"),
            Some(Value::Text("a, b".to_owned()))
        );
        assert_eq!(
            Value::parse(ValueKind::Integer, "-5"),
            Some(Value::Integer(-5))
        );
        assert_eq!(
            Value::parse(ValueKind::Boolean, "true"),
            Some(Value::Boolean(true))
        );
        assert!(matches!(
            Value::parse(ValueKind::Date, "20250101"),
            Some(Value::Date(_))
        ));
        assert!(matches!(
            Value::parse(ValueKind::Recur, "FREQ=DAILY"),
            Some(Value::Recur(_))
        ));
    }

    #[test]
    fn rejects_text_outside_grammar() {
        assert_eq!(Value::parse(ValueKind::Date, "20250101T000000"), None);
        assert_eq!(Value::parse(ValueKind::DateTime, "tomorrow"), None);
        assert_eq!(Value::parse(ValueKind::Duration, "1 hour"), None);
        assert_eq!(Value::parse(ValueKind::Binary, "not base64!"), None);
    }
}
