// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar components: the owned tree built from `BEGIN`/`END` blocks.

use jiff::civil::Time;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};

use crate::keyword::{
    KW_DAYLIGHT, KW_STANDARD, KW_VALARM, KW_VCALENDAR, KW_VEVENT, KW_VFREEBUSY, KW_VJOURNAL,
    KW_VTIMEZONE, KW_VTODO,
};
use crate::kind::impl_kind_mapping;
use crate::parameter::ParameterKind;
use crate::property::{Property, PropertyKind};
use crate::value::{DateOrDateTime, Value};

impl_kind_mapping! {
    /// Kinds of iCalendar components
    #[expect(missing_docs)]
    enum ComponentKind {
        Calendar => KW_VCALENDAR,
        Event    => KW_VEVENT,
        Todo     => KW_VTODO,
        Journal  => KW_VJOURNAL,
        FreeBusy => KW_VFREEBUSY,
        TimeZone => KW_VTIMEZONE,
        Alarm    => KW_VALARM,
        Standard => KW_STANDARD,
        Daylight => KW_DAYLIGHT,
    }
}

/// A component with its properties and nested components, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Kind of the component
    pub kind: ComponentKind,

    /// Properties in source order
    pub properties: Vec<Property>,

    /// Nested components in source order
    pub components: Vec<Component>,
}

impl Component {
    /// Create an empty component.
    #[must_use]
    pub const fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Find the first property of the given kind.
    #[must_use]
    pub fn property(&self, kind: &PropertyKind) -> Option<&Property> {
        self.properties.iter().find(|p| &p.kind == kind)
    }

    /// The instant at which this component ends, in UTC.
    ///
    /// Taken from DTEND, else DUE, else DTSTART plus DURATION, else DTSTART
    /// itself (plus one day when it is a date). Floating times are read as
    /// UTC. Returns `None` when none of these yield a usable instant.
    #[must_use]
    pub fn end_instant(&self) -> Option<Timestamp> {
        if let Some(end) = self
            .property(&PropertyKind::DtEnd)
            .or_else(|| self.property(&PropertyKind::Due))
        {
            return instant(end);
        }

        let start = self.property(&PropertyKind::DtStart)?;
        let start_instant = instant(start)?;
        let length = match self.property(&PropertyKind::Duration).and_then(Property::value) {
            Some(Value::Duration(duration)) => duration.to_signed_duration(),
            _ => match start.value().and_then(Value::as_date_or_date_time) {
                Some(DateOrDateTime::Date(_)) => SignedDuration::from_hours(24),
                _ => SignedDuration::ZERO,
            },
        };
        start_instant.checked_add(length).ok()
    }
}

/// Resolve a date or date-time property to an instant.
fn instant(prop: &Property) -> Option<Timestamp> {
    let time = prop.value()?.as_date_or_date_time()?;
    let civil = match time {
        DateOrDateTime::Date(date) => date.civil_date().ok()?.to_datetime(Time::midnight()),
        DateOrDateTime::DateTime(date_time) => date_time.civil_date_time().ok()?,
    };

    let tz = match time {
        DateOrDateTime::DateTime(date_time) if date_time.time.utc => TimeZone::UTC,
        _ => match prop.parameter(&ParameterKind::TimeZoneIdentifier) {
            Some(tzid) => {
                let name = tzid.joined();
                TimeZone::get(&name).unwrap_or_else(|err| {
                    tracing::warn!(tzid = %name, %err, "unknown time zone, reading the time as UTC");
                    TimeZone::UTC
                })
            }
            None => TimeZone::UTC,
        },
    };

    civil.to_zoned(tz).ok().map(|zoned| zoned.timestamp())
}

#[cfg(test)]
mod tests {
    use crate::syntax::parse_content_line;

    use super::*;

    fn component(lines: &[&str]) -> Component {
        let mut comp = Component::new(ComponentKind::Event);
        for line in lines {
            let line = parse_content_line(line).unwrap();
            comp.properties.push(Property::from_content_line(line));
        }
        comp
    }

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn resolves_kind() {
        assert_eq!(ComponentKind::from("vevent"), ComponentKind::Event);
        assert_eq!(
            ComponentKind::from("X-WR-THING"),
            ComponentKind::XName("X-WR-THING".to_owned())
        );
        assert_eq!(ComponentKind::Calendar.name(), "VCALENDAR");
    }

    #[test]
    fn end_from_dtend() {
        let comp = component(&["DTSTART:20240101T090000Z", "DTEND:20240101T100000Z"]);
        assert_eq!(comp.end_instant(), Some(ts("2024-01-01T10:00:00Z")));

        let comp = component(&["DTEND;VALUE=DATE:20230601"]);
        assert_eq!(comp.end_instant(), Some(ts("2023-06-01T00:00:00Z")));
    }

    #[test]
    fn end_from_due() {
        let comp = component(&["DUE:20240301T120000"]);
        assert_eq!(comp.end_instant(), Some(ts("2024-03-01T12:00:00Z")));
    }

    #[test]
    fn end_from_duration() {
        let comp = component(&["DTSTART:20240101T090000Z", "DURATION:PT1H30M"]);
        assert_eq!(comp.end_instant(), Some(ts("2024-01-01T10:30:00Z")));
    }

    #[test]
    fn end_from_start() {
        let comp = component(&["DTSTART:20240101T090000Z"]);
        assert_eq!(comp.end_instant(), Some(ts("2024-01-01T09:00:00Z")));

        let comp = component(&["DTSTART;VALUE=DATE:20240101"]);
        assert_eq!(comp.end_instant(), Some(ts("2024-01-02T00:00:00Z")));
    }

    #[test]
    fn end_with_unknown_time_zone() {
        let comp = component(&["DTEND;TZID=Not/AZone:20240101T100000"]);
        assert_eq!(comp.end_instant(), Some(ts("2024-01-01T10:00:00Z")));
    }

    #[test]
    fn no_end() {
        assert_eq!(component(&["SUMMARY:nothing"]).end_instant(), None);
        assert_eq!(component(&["DTEND:soon"]).end_instant(), None);
    }
}
