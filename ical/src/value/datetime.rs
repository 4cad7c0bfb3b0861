// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date, time and UTC offset values as defined in RFC 5545 Section 3.3.

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::value::Extra;

/// Date value in the iCalendar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ValueDate {
    /// Year component.
    pub year: i16,

    /// Month component, 1-12.
    pub month: i8,

    /// Day component, 1-31.
    pub day: i8,
}

impl ValueDate {
    /// Convert to `jiff::civil::Date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the date does not exist in the Gregorian calendar.
    pub fn civil_date(self) -> Result<jiff::civil::Date, jiff::Error> {
        jiff::civil::Date::new(self.year, self.month, self.day)
    }

    /// Render as `YYYY-MM-DD`, the xCal and jCal representation.
    #[must_use]
    pub fn to_extended(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Basic format `YYYYMMDD`, as in iCalendar text.
impl Display for ValueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
pub(crate) fn value_date<'src>() -> impl Parser<'src, &'src str, ValueDate, Extra<'src>> + Clone
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            let date = ValueDate { year, month, day };
            match date.civil_date() {
                Ok(_) => Ok(date),
                Err(_) => Err(Rich::custom(span, "date does not exist")),
            }
        })
}

/// Time value defined in the RFC 5545 Section 3.3.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTime {
    /// Hour component, 0-23.
    pub hour: u8,

    /// Minute component, 0-59.
    pub minute: u8,

    /// Second component, 0-60 (60 for leap second).
    pub second: u8,

    /// Whether the time is in UTC (indicated by a trailing 'Z').
    pub utc: bool,
}

impl ValueTime {
    /// Create a new `ValueTime` from components.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8, utc: bool) -> Self {
        Self {
            hour,
            minute,
            second,
            utc,
        }
    }

    /// Convert to `jiff::civil::Time`, contracting a leap second to 59.
    ///
    /// # Errors
    ///
    /// Returns an error if a component is out of range.
    #[expect(clippy::cast_possible_wrap)]
    pub fn civil_time(self) -> Result<jiff::civil::Time, jiff::Error> {
        jiff::civil::Time::new(
            self.hour as i8,
            self.minute as i8,
            self.second.min(59) as i8,
            0,
        )
    }

    /// Render as `HH:MM:SS`, the xCal and jCal representation.
    #[must_use]
    pub fn to_extended(self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Basic format `HHMMSS[Z]`, as in iCalendar text.
impl Display for ValueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        if self.utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
pub(crate) fn value_time<'src>() -> impl Parser<'src, &'src str, ValueTime, Extra<'src>> + Clone
{
    time_hour()
        .then(time_minute())
        .then(time_second())
        .then(just('Z').or_not())
        .map(|(((hour, minute), second), utc)| ValueTime::new(hour, minute, second, utc.is_some()))
}

/// Date-Time value defined in the RFC 5545 Section 3.3.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDateTime {
    /// Date component.
    pub date: ValueDate,

    /// Time component.
    pub time: ValueTime,
}

impl ValueDateTime {
    /// Create a new `ValueDateTime`.
    #[must_use]
    pub const fn new(date: ValueDate, time: ValueTime) -> Self {
        Self { date, time }
    }

    /// Convert to `jiff::civil::DateTime`, ignoring the UTC flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the date or time does not exist.
    pub fn civil_date_time(self) -> Result<jiff::civil::DateTime, jiff::Error> {
        Ok(self.date.civil_date()?.to_datetime(self.time.civil_time()?))
    }

    /// Render as `YYYY-MM-DDTHH:MM:SS`, the xCal and jCal representation.
    ///
    /// No zone designator is emitted.
    #[must_use]
    pub fn to_extended(self) -> String {
        format!("{}T{}", self.date.to_extended(), self.time.to_extended())
    }
}

/// Basic format `YYYYMMDDTHHMMSS[Z]`, as in iCalendar text.
impl Display for ValueDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
/// ```
pub(crate) fn value_date_time<'src>()
-> impl Parser<'src, &'src str, ValueDateTime, Extra<'src>> + Clone {
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| ValueDateTime { date, time })
}

/// A DATE or DATE-TIME, as accepted by DTSTART, UNTIL and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrDateTime {
    /// Date only, a whole day
    Date(ValueDate),

    /// Date with time of day
    DateTime(ValueDateTime),
}

impl DateOrDateTime {
    /// Render in the xCal and jCal representation.
    #[must_use]
    pub fn to_extended(self) -> String {
        match self {
            DateOrDateTime::Date(date) => date.to_extended(),
            DateOrDateTime::DateTime(date_time) => date_time.to_extended(),
        }
    }
}

impl Display for DateOrDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrDateTime::Date(date) => write!(f, "{date}"),
            DateOrDateTime::DateTime(date_time) => write!(f, "{date_time}"),
        }
    }
}

/// UTC Offset Value defined in RFC 5545 Section 3.3.14
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueUtcOffset {
    /// Whether the offset is positive
    pub positive: bool,

    /// Hour, 0-23
    pub hour: u8,

    /// Minute, 0-59
    pub minute: u8,

    /// Second, 0-60, optional
    pub second: Option<u8>,
}

impl ValueUtcOffset {
    /// Render as `+HH:MM[:SS]`, the xCal and jCal representation.
    #[must_use]
    pub fn to_extended(self) -> String {
        let sign = if self.positive { '+' } else { '-' };
        match self.second {
            Some(second) => format!("{sign}{:02}:{:02}:{second:02}", self.hour, self.minute),
            None => format!("{sign}{:02}:{:02}", self.hour, self.minute),
        }
    }
}

/// Basic format `+HHMM[SS]`, as in iCalendar text.
impl Display for ValueUtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{sign}{:02}{:02}", self.hour, self.minute)?;
        if let Some(second) = self.second {
            write!(f, "{second:02}")?;
        }
        Ok(())
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// utc-offset = time-numzone
///
/// time-numzone = ("+" / "-") time-hour time-minute [time-second]
/// ```
pub(crate) fn value_utc_offset<'src>()
-> impl Parser<'src, &'src str, ValueUtcOffset, Extra<'src>> + Clone {
    select! { c @ ('+' | '-') => c }
        .then(time_hour())
        .then(time_minute())
        .then(time_second().or_not())
        .map(|(((sign, hour), minute), second)| ValueUtcOffset {
            positive: !matches!(sign, '-'),
            hour,
            minute,
            second,
        })
}

fn time_hour<'src>() -> impl Parser<'src, &'src str, u8, Extra<'src>> + Clone {
    choice((
        u8_0_1().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(u8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src>() -> impl Parser<'src, &'src str, u8, Extra<'src>> + Clone {
    u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src>() -> impl Parser<'src, &'src str, u8, Extra<'src>> + Clone {
    choice((
        u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').ignore_then(just('0').to(60)), // leap second
    ))
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        fn $fname<'src>() -> impl Parser<'src, &'src str, $ty, Extra<'src>> + Clone {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(u8_0_1 : u8 => { '0', '1' });
define_digit_select!(u8_0_3 : u8 => { '0', '1', '2', '3' });
define_digit_select!(u8_0_5 : u8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(u8_0_9 : u8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date() {
        fn parse(src: &str) -> Result<ValueDate, Vec<Rich<'_, char>>> {
            value_date().parse(src).into_result()
        }

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.4
            ("19970714", ValueDate { year: 1997, month: 7, day: 14 }),
            // extra tests
            ("20240101", ValueDate { year: 2024, month: 1, day: 1 }),
            ("20000229", ValueDate { year: 2000, month: 2, day: 29 }), // leap year
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected);
        }

        let fail_cases = [
            "20241301",  // invalid month
            "20240001",  // invalid month
            "19970230",  // no such day
            "abcd1234",  // invalid characters
            "2024011",   // invalid length
            "202401011", // invalid length
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_date_time() {
        fn parse(src: &str) -> Result<ValueDateTime, Vec<Rich<'_, char>>> {
            value_date_time().parse(src).into_result()
        }

        let dt = parse("19980119T070000Z").unwrap();
        assert_eq!(dt.date, ValueDate { year: 1998, month: 1, day: 19 });
        assert_eq!(dt.time, ValueTime::new(7, 0, 0, true));

        let dt = parse("19970630T235960").unwrap();
        assert_eq!(dt.time, ValueTime::new(23, 59, 60, false));

        for src in [
            "19980119T230000-0800", // offset is not allowed
            "19970714 133000",      // missing 'T'
            "19970714T250000",      // invalid hour
            "19970714T126000",      // invalid minute
            "19970714T123461",      // invalid second
        ] {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_utc_offset() {
        fn parse(src: &str) -> Result<ValueUtcOffset, Vec<Rich<'_, char>>> {
            value_utc_offset().parse(src).into_result()
        }

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.14
            (  "-0500", ValueUtcOffset{positive: false, hour: 5, minute:  0, second: None}),
            (  "+0100", ValueUtcOffset{positive:  true, hour: 1, minute:  0, second: None}),
            // extra tests
            ("-123456", ValueUtcOffset{positive: false, hour:12, minute: 34, second: Some(56)}),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected);
        }

        for src in ["0500", "+2400", "-1260", "+120", ""] {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn renders_basic_and_extended_forms() {
        let dt = value_date_time()
            .parse("20250107T090500Z")
            .into_result()
            .unwrap();
        assert_eq!(dt.to_string(), "20250107T090500Z");
        assert_eq!(dt.to_extended(), "2025-01-07T09:05:00");
        assert_eq!(dt.date.to_extended(), "2025-01-07");

        let offset = ValueUtcOffset {
            positive: false,
            hour: 5,
            minute: 0,
            second: None,
        };
        assert_eq!(offset.to_string(), "-0500");
        assert_eq!(offset.to_extended(), "-05:00");
    }
}
