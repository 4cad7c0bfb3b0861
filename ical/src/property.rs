// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property kinds and typed properties.
//!
//! This module defines the `PropertyKind` enum that represents all standard
//! iCalendar properties defined in RFC 5545, along with their allowed value
//! types, and converts content lines into typed [`Property`] values.

use std::slice;

use crate::keyword::{
    KW_ACTION, KW_ATTACH, KW_ATTENDEE, KW_CALSCALE, KW_CATEGORIES, KW_CLASS, KW_COMMENT,
    KW_COMPLETED, KW_CONTACT, KW_CREATED, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DUE,
    KW_DURATION, KW_EXDATE, KW_FREEBUSY, KW_GEO, KW_LAST_MODIFIED, KW_LOCATION, KW_METHOD,
    KW_ORGANIZER, KW_PERCENT_COMPLETE, KW_PRIORITY, KW_PRODID, KW_RDATE, KW_RECURRENCE_ID,
    KW_RELATED_TO, KW_REPEAT, KW_REQUEST_STATUS, KW_RESOURCES, KW_RRULE, KW_SEQUENCE, KW_STATUS,
    KW_SUMMARY, KW_TRANSP, KW_TRIGGER, KW_TZID, KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO,
    KW_TZURL, KW_UID, KW_URL, KW_VERSION,
};
use crate::kind::impl_kind_mapping;
use crate::parameter::{Parameter, ParameterKind};
use crate::syntax::ContentLine;
use crate::value::{
    DateOrDateTime, DateTimePeriod, Geo, RequestStatus, Trigger, Value, ValueKind, split_unescaped,
};

/// How a property's value is composed from the basic value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Single,
    Geo,
    RequestStatus,
    Trigger,
    DateTimePeriod,
}

/// Macro to define `PropertyKind` with associated value types.
///
/// Usage: `property_kind!(Variant => KW => Shape => &[...], ...)`
macro_rules! property_kind {
    (
        $(
            $variant:ident => $kw:ident => $shape:ident => $value_kinds:expr
        ),+ $(,)?
    ) => {
        impl_kind_mapping! {
            /// Kind of iCalendar property.
            /// Represents all standard properties defined in RFC 5545.
            #[expect(missing_docs)]
            enum PropertyKind {
                $(
                    $variant => $kw,
                )+
            }
        }

        impl PropertyKind {
            /// Returns the allowed value kinds, the default first.
            ///
            /// Empty for unrecognized and x-name properties, whose type is
            /// only known from a `VALUE=` parameter.
            #[must_use]
            pub fn value_kinds(&self) -> &'static [ValueKind] {
                match self {
                    $(PropertyKind::$variant => $value_kinds,)+
                    PropertyKind::XName(_) | PropertyKind::Unrecognized(_) => &[],
                }
            }

            fn shape(&self) -> Shape {
                match self {
                    $(PropertyKind::$variant => Shape::$shape,)+
                    PropertyKind::XName(_) | PropertyKind::Unrecognized(_) => Shape::Single,
                }
            }
        }

        #[cfg(test)]
        const KINDS: &[PropertyKind] = &[
            $(
                PropertyKind::$variant,
            )+
        ];
    };
}

property_kind! {
    // 3.7.1.  Calendar Scale
    CalScale    => KW_CALSCALE  => Single => &[ValueKind::Text],
    // 3.7.2.  Method
    Method      => KW_METHOD    => Single => &[ValueKind::Text],
    // 3.7.3.  Product Identifier
    ProdId      => KW_PRODID    => Single => &[ValueKind::Text],
    // 3.7.4.  Version
    Version     => KW_VERSION   => Single => &[ValueKind::Text],
    // 3.8.1.1.  Attachment
    Attach      => KW_ATTACH    => Single => &[ValueKind::Uri, ValueKind::Binary],
    // 3.8.1.2.  Categories
    Categories  => KW_CATEGORIES => Single => &[ValueKind::Text],
    // 3.8.1.3.  Classification
    Class       => KW_CLASS     => Single => &[ValueKind::Text],
    // 3.8.1.4.  Comment
    Comment     => KW_COMMENT   => Single => &[ValueKind::Text],
    // 3.8.1.5.  Description
    Description => KW_DESCRIPTION => Single => &[ValueKind::Text],
    // 3.8.1.6.  Geographic Position
    Geo         => KW_GEO       => Geo => &[ValueKind::Float],
    // 3.8.1.7.  Location
    Location    => KW_LOCATION  => Single => &[ValueKind::Text],
    // 3.8.1.8.  Percent Complete
    PercentComplete => KW_PERCENT_COMPLETE => Single => &[ValueKind::Integer],
    // 3.8.1.9.  Priority
    Priority    => KW_PRIORITY  => Single => &[ValueKind::Integer],
    // 3.8.1.10.  Resources
    Resources   => KW_RESOURCES => Single => &[ValueKind::Text],
    // 3.8.1.11.  Status
    Status      => KW_STATUS    => Single => &[ValueKind::Text],
    // 3.8.1.12.  Summary
    Summary     => KW_SUMMARY   => Single => &[ValueKind::Text],
    // 3.8.2.1.  Date-Time Completed
    Completed   => KW_COMPLETED => Single => &[ValueKind::DateTime],
    // 3.8.2.2.  Date-Time End
    DtEnd       => KW_DTEND     => Single => &[ValueKind::DateTime, ValueKind::Date],
    // 3.8.2.3.  Date-Time Due
    Due         => KW_DUE       => Single => &[ValueKind::DateTime, ValueKind::Date],
    // 3.8.2.4.  Date-Time Start
    DtStart     => KW_DTSTART   => Single => &[ValueKind::DateTime, ValueKind::Date],
    // 3.8.2.5.  Duration
    Duration    => KW_DURATION  => Single => &[ValueKind::Duration],
    // 3.8.2.6.  Free/Busy Time
    FreeBusy    => KW_FREEBUSY  => Single => &[ValueKind::Period],
    // 3.8.2.7.  Time Transparency
    Transp      => KW_TRANSP    => Single => &[ValueKind::Text],
    // 3.8.3.1.  Time Zone Identifier
    TzId        => KW_TZID      => Single => &[ValueKind::Text],
    // 3.8.3.2.  Time Zone Name
    TzName      => KW_TZNAME    => Single => &[ValueKind::Text],
    // 3.8.3.3.  Time Zone Offset From
    TzOffsetFrom => KW_TZOFFSETFROM => Single => &[ValueKind::UtcOffset],
    // 3.8.3.4.  Time Zone Offset To
    TzOffsetTo  => KW_TZOFFSETTO => Single => &[ValueKind::UtcOffset],
    // 3.8.3.5.  Time Zone URL
    TzUrl       => KW_TZURL     => Single => &[ValueKind::Uri],
    // 3.8.4.1.  Attendee
    Attendee    => KW_ATTENDEE  => Single => &[ValueKind::CalAddress],
    // 3.8.4.2.  Contact
    Contact     => KW_CONTACT   => Single => &[ValueKind::Text],
    // 3.8.4.3.  Organizer
    Organizer   => KW_ORGANIZER => Single => &[ValueKind::CalAddress],
    // 3.8.4.4.  Recurrence ID
    RecurrenceId => KW_RECURRENCE_ID => Single => &[ValueKind::DateTime, ValueKind::Date],
    // 3.8.4.5.  Related To
    RelatedTo   => KW_RELATED_TO => Single => &[ValueKind::Text],
    // 3.8.4.6.  Uniform Resource Locator
    Url         => KW_URL       => Single => &[ValueKind::Uri],
    // 3.8.4.7.  Unique Identifier
    Uid         => KW_UID       => Single => &[ValueKind::Text],
    // 3.8.5.1.  Exception Date-Times
    ExDate      => KW_EXDATE    => Single => &[ValueKind::DateTime, ValueKind::Date],
    // 3.8.5.2.  Recurrence Date-Times
    RDate       => KW_RDATE     => DateTimePeriod => &[ValueKind::DateTime, ValueKind::Date, ValueKind::Period],
    // 3.8.5.3.  Recurrence Rule
    RRule       => KW_RRULE     => Single => &[ValueKind::Recur],
    // 3.8.6.1.  Action
    Action      => KW_ACTION    => Single => &[ValueKind::Text],
    // 3.8.6.2.  Repeat Count
    Repeat      => KW_REPEAT    => Single => &[ValueKind::Integer],
    // 3.8.6.3.  Trigger
    Trigger     => KW_TRIGGER   => Trigger => &[ValueKind::Duration, ValueKind::DateTime],
    // 3.8.7.1.  Date-Time Created
    Created     => KW_CREATED   => Single => &[ValueKind::DateTime],
    // 3.8.7.2.  Date-Time Stamp
    DtStamp     => KW_DTSTAMP   => Single => &[ValueKind::DateTime],
    // 3.8.7.3.  Last Modified
    LastModified => KW_LAST_MODIFIED => Single => &[ValueKind::DateTime],
    // 3.8.7.4.  Sequence Number
    Sequence    => KW_SEQUENCE  => Single => &[ValueKind::Integer],
    // 3.8.8.3.  Request Status
    RequestStatus => KW_REQUEST_STATUS => RequestStatus => &[ValueKind::Text],
}

impl PropertyKind {
    /// Whether the textual value is a comma separated list of values.
    #[must_use]
    pub const fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            PropertyKind::Categories
                | PropertyKind::Resources
                | PropertyKind::FreeBusy
                | PropertyKind::ExDate
                | PropertyKind::RDate
        )
    }
}

/// A property of a component, owning its parameters and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Kind of the property
    pub kind: PropertyKind,

    /// Parameters in source order
    pub parameters: Vec<Parameter>,

    /// The value. Multi-valued kinds hold one entry per list item, every
    /// other kind exactly one.
    pub values: Vec<Value>,
}

impl Property {
    /// Build a typed property from a decoded content line.
    ///
    /// Values that do not match their type are kept as [`Value::Unknown`].
    #[must_use]
    pub fn from_content_line(line: ContentLine) -> Self {
        let kind = PropertyKind::from(line.name.as_str());
        let parameters: Vec<Parameter> = line.parameters.into_iter().map(Parameter::from).collect();
        let explicit = parameters.iter().find_map(Parameter::value_kind);

        let values = if kind.is_multi_valued() {
            split_unescaped(&line.value, ',')
                .map(|item| typed_value(&kind, explicit, item))
                .collect()
        } else {
            vec![typed_value(&kind, explicit, &line.value)]
        };

        Self {
            kind,
            parameters,
            values,
        }
    }

    /// The first (for single-valued kinds, the only) value.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.values.first()
    }

    /// Find a parameter by kind.
    #[must_use]
    pub fn parameter(&self, kind: &ParameterKind) -> Option<&Parameter> {
        self.parameters.iter().find(|p| &p.kind == kind)
    }
}

fn typed_value(kind: &PropertyKind, explicit: Option<ValueKind>, raw: &str) -> Value {
    let shape = kind.shape();
    let kinds = match &explicit {
        Some(explicit) => slice::from_ref(explicit),
        None => kind.value_kinds(),
    };

    let parsed = match (shape, explicit) {
        (Shape::Geo, None) => Geo::parse(raw).map(Value::Geo),
        (Shape::RequestStatus, None) => RequestStatus::parse(raw).map(Value::RequestStatus),
        _ => kinds.iter().find_map(|&k| parse_as(shape, k, raw)),
    };

    parsed.unwrap_or_else(|| {
        if !kinds.is_empty() {
            tracing::warn!(property = %kind, value = raw, "value does not match its type, keeping it as unknown");
        }
        Value::Unknown(raw.to_owned())
    })
}

fn parse_as(shape: Shape, kind: ValueKind, raw: &str) -> Option<Value> {
    let value = Value::parse(kind, raw)?;
    Some(match (shape, value) {
        (Shape::Trigger, Value::Duration(duration)) => Value::Trigger(Trigger::Duration(duration)),
        (Shape::Trigger, Value::DateTime(time)) => Value::Trigger(Trigger::Time(time)),
        (Shape::DateTimePeriod, Value::Date(date)) => {
            Value::DateTimePeriod(DateTimePeriod::Time(DateOrDateTime::Date(date)))
        }
        (Shape::DateTimePeriod, Value::DateTime(time)) => {
            Value::DateTimePeriod(DateTimePeriod::Time(DateOrDateTime::DateTime(time)))
        }
        (Shape::DateTimePeriod, Value::Period(period)) => {
            Value::DateTimePeriod(DateTimePeriod::Period(period))
        }
        (_, value) => value,
    })
}

#[cfg(test)]
mod tests {
    use crate::syntax::parse_content_line;
    use crate::value::{ValueDuration, ValueRecurrenceRule};

    use super::*;

    fn property(src: &str) -> Property {
        Property::from_content_line(parse_content_line(src).unwrap())
    }

    #[test]
    fn all_kinds_have_value_kinds() {
        for kind in KINDS {
            assert!(
                !kind.value_kinds().is_empty(),
                "Property {kind:?}: value_kinds must not be empty",
            );
            assert_eq!(&PropertyKind::from(kind.name()), kind);
        }
    }

    #[test]
    fn resolves_names() {
        assert_eq!(PropertyKind::from("dtstart"), PropertyKind::DtStart);
        assert_eq!(
            PropertyKind::from("X-WR-CALNAME"),
            PropertyKind::XName("X-WR-CALNAME".to_owned())
        );
        assert_eq!(
            PropertyKind::from("COLOR"),
            PropertyKind::Unrecognized("COLOR".to_owned())
        );
    }

    #[test]
    fn uses_default_value_kind() {
        let prop = property("DTSTART:20250101T090000Z");
        assert!(matches!(prop.value(), Some(Value::DateTime(_))));

        // falls back to the next allowed kind
        let prop = property("DTSTART:20250101");
        assert!(matches!(prop.value(), Some(Value::Date(_))));
    }

    #[test]
    fn honors_value_parameter() {
        let prop = property("DTSTART;VALUE=DATE:20250101");
        assert!(matches!(prop.value(), Some(Value::Date(_))));

        let prop = property("X-COUNT;VALUE=INTEGER:42");
        assert_eq!(prop.value(), Some(&Value::Integer(42)));
    }

    #[test]
    fn keeps_unknown_values() {
        let prop = property("X-WR-CALNAME:My Calendar");
        assert_eq!(prop.value(), Some(&Value::Unknown("My Calendar".to_owned())));

        let prop = property("DTSTART:next tuesday");
        assert_eq!(prop.value(), Some(&Value::Unknown("next tuesday".to_owned())));
    }

    #[test]
    fn splits_multi_valued() {
        let prop = property(r"CATEGORIES:A,B\,C,D");
        assert_eq!(
            prop.values,
            [
                Value::Text("A".to_owned()),
                Value::Text("B,C".to_owned()),
                Value::Text("D".to_owned()),
            ]
        );

        let prop = property("EXDATE:20250101T090000,20250108T090000");
        assert_eq!(prop.values.len(), 2);
        assert!(prop.values.iter().all(|v| matches!(v, Value::DateTime(_))));

        // not multi-valued
        let prop = property(r"SUMMARY:a\,b");
        assert_eq!(prop.values, [Value::Text("a,b".to_owned())]);
    }

    #[test]
    fn builds_composite_values() {
        let prop = property("TRIGGER:-PT15M");
        assert_eq!(
            prop.value(),
            Some(&Value::Trigger(Trigger::Duration(ValueDuration::DateTime {
                positive: false,
                day: 0,
                hour: 0,
                minute: 15,
                second: 0,
            })))
        );

        let prop = property("TRIGGER;VALUE=DATE-TIME:19980101T050000Z");
        assert!(matches!(prop.value(), Some(Value::Trigger(Trigger::Time(_)))));

        let prop = property("RDATE;VALUE=PERIOD:19960403T020000Z/19960403T040000Z");
        assert!(matches!(
            prop.value(),
            Some(Value::DateTimePeriod(DateTimePeriod::Period(_)))
        ));

        let prop = property("GEO:37.386013;-122.082932");
        assert!(matches!(prop.value(), Some(Value::Geo(_))));

        let prop = property("REQUEST-STATUS:2.0;Success");
        assert!(matches!(prop.value(), Some(Value::RequestStatus(_))));

        let prop = property("RRULE:FREQ=WEEKLY;COUNT=4");
        let Some(Value::Recur(rule)) = prop.value() else {
            panic!("expected a recurrence rule");
        };
        let mut expected = ValueRecurrenceRule::new(crate::value::RecurrenceFrequency::Weekly);
        expected.count = Some(4);
        assert_eq!(rule, &expected);
    }

    #[test]
    fn keeps_parameters() {
        let prop = property("DTSTART;TZID=Europe/Berlin:20250101T090000");
        assert_eq!(
            prop.parameter(&ParameterKind::TimeZoneIdentifier)
                .map(Parameter::joined)
                .as_deref(),
            Some("Europe/Berlin")
        );
    }
}
