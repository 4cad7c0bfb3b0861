// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value encoding table shared by the serializers.
//!
//! Every [`Value`] is rendered in exactly one place: its iCalendar text form
//! through [`Display`], and its structured form for xCal and jCal through
//! [`Value::encode`]. The structured form names the value's element and jCal
//! type and breaks composite values into named fields, so the XML and JSON
//! writers only decide the syntax.

use std::fmt::{self, Display};

use crate::keyword::{KW_BOOLEAN_FALSE, KW_BOOLEAN_TRUE};
use crate::value::{
    DateOrDateTime, DateTimePeriod, Geo, RequestStatus, Trigger, Value, ValuePeriod,
    ValueRecurrenceRule, escape_text,
};

/// A value broken down for xCal and jCal.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    /// Lower-case element name of the value in xCal.
    pub element: &'static str,

    /// Value type name in jCal.
    pub json_type: &'static str,

    /// Content of the value.
    pub body: Body,
}

/// Content of an encoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A single scalar.
    Scalar(Scalar),

    /// Exactly one named field. xCal writes it as a child element, jCal as a
    /// plain scalar.
    Choice(Field),

    /// Ordered named fields. xCal writes child elements, jCal an array of the
    /// field values.
    Tuple(Vec<Field>),

    /// Ordered named fields. xCal writes child elements, jCal an object keyed
    /// by field name.
    Record(Vec<Field>),
}

/// A named part of a composite value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Lower-case field name.
    pub name: &'static str,

    /// Field content.
    pub value: FieldValue,
}

/// Content of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// One scalar.
    One(Scalar),

    /// An ordered list, one xCal element per entry, a jCal array.
    List(Vec<Scalar>),
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A string, not escaped for any syntax.
    Text(String),

    /// A boolean.
    Boolean(bool),

    /// An integer.
    Integer(i64),

    /// A floating point number.
    Float(f64),
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => s.fmt(f),
            Scalar::Boolean(b) => b.fmt(f),
            Scalar::Integer(i) => i.fmt(f),
            Scalar::Float(x) => x.fmt(f),
        }
    }
}

impl Field {
    fn one(name: &'static str, value: Scalar) -> Self {
        Self {
            name,
            value: FieldValue::One(value),
        }
    }

    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self::one(name, Scalar::Text(value.into()))
    }
}

impl Encoded {
    const fn new(element: &'static str, json_type: &'static str, body: Body) -> Self {
        Self {
            element,
            json_type,
            body,
        }
    }

    fn text(element: &'static str, value: impl Into<String>) -> Self {
        Self::new(element, element, Body::Scalar(Scalar::Text(value.into())))
    }
}

impl Value {
    /// Break this value down for xCal and jCal.
    #[must_use]
    pub fn encode(&self) -> Encoded {
        match self {
            Value::Binary(s) => Encoded::text("binary", s.clone()),
            Value::Boolean(b) => Encoded::new("boolean", "boolean", Body::Scalar(Scalar::Boolean(*b))),
            Value::CalAddress(s) => Encoded::text("cal-address", s.clone()),
            Value::Date(date) => Encoded::text("date", date.to_extended()),
            Value::DateTime(dt) => Encoded::text("date-time", dt.to_extended()),
            Value::Duration(duration) => Encoded::text("duration", duration.to_string()),
            Value::Float(x) => Encoded::new("float", "float", Body::Scalar(Scalar::Float(*x))),
            Value::Integer(i) => Encoded::new(
                "integer",
                "integer",
                Body::Scalar(Scalar::Integer(i64::from(*i))),
            ),
            Value::Period(period) => {
                Encoded::new("period", "period", Body::Tuple(period_fields(period)))
            }
            Value::Recur(rule) => Encoded::new("recur", "recur", Body::Record(recur_fields(rule))),
            Value::Text(s) => Encoded::text("text", s.clone()),
            Value::Time(time) => Encoded::text("time", time.to_extended()),
            Value::Uri(s) => Encoded::text("uri", s.clone()),
            Value::UtcOffset(offset) => Encoded::text("utc-offset", offset.to_extended()),
            Value::DateTimePeriod(DateTimePeriod::Time(time)) => Encoded::new(
                "date-time-period",
                time_type(*time),
                Body::Choice(Field::text("time", time.to_extended())),
            ),
            Value::DateTimePeriod(DateTimePeriod::Period(period)) => Encoded::new(
                "date-time-period",
                "period",
                Body::Tuple(period_fields(period)),
            ),
            Value::Trigger(Trigger::Duration(duration)) => Encoded::new(
                "trigger",
                "duration",
                Body::Choice(Field::text("duration", duration.to_string())),
            ),
            Value::Trigger(Trigger::Time(time)) => Encoded::new(
                "trigger",
                "date-time",
                Body::Choice(Field::text("time", time.to_extended())),
            ),
            Value::RequestStatus(status) => Encoded::new(
                "request-status",
                "text",
                Body::Tuple(request_status_fields(status)),
            ),
            Value::Geo(geo) => Encoded::new("geo", "float", Body::Tuple(geo_fields(geo))),
            Value::Unknown(raw) => Encoded::text("unknown", raw.clone()),
        }
    }
}

/// The iCalendar text form, escaped where the value type requires it.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(true) => KW_BOOLEAN_TRUE.fmt(f),
            Value::Boolean(false) => KW_BOOLEAN_FALSE.fmt(f),
            Value::Date(date) => date.fmt(f),
            Value::DateTime(dt) => dt.fmt(f),
            Value::Duration(duration) => duration.fmt(f),
            Value::Float(x) => x.fmt(f),
            Value::Integer(i) => i.fmt(f),
            Value::Period(period) => period.fmt(f),
            Value::Recur(rule) => rule.fmt(f),
            Value::Text(s) => escape_text(s).fmt(f),
            Value::Time(time) => time.fmt(f),
            Value::UtcOffset(offset) => offset.fmt(f),
            Value::DateTimePeriod(DateTimePeriod::Time(time)) => time.fmt(f),
            Value::DateTimePeriod(DateTimePeriod::Period(period)) => period.fmt(f),
            Value::Trigger(Trigger::Duration(duration)) => duration.fmt(f),
            Value::Trigger(Trigger::Time(time)) => time.fmt(f),
            Value::RequestStatus(status) => status.fmt(f),
            Value::Geo(geo) => geo.fmt(f),
            Value::Binary(s) | Value::CalAddress(s) | Value::Uri(s) | Value::Unknown(s) => {
                s.fmt(f)
            }
        }
    }
}

fn time_type(time: DateOrDateTime) -> &'static str {
    match time {
        DateOrDateTime::Date(_) => "date",
        DateOrDateTime::DateTime(_) => "date-time",
    }
}

fn period_fields(period: &ValuePeriod) -> Vec<Field> {
    match period {
        ValuePeriod::Explicit { start, end } => vec![
            Field::text("start", start.to_extended()),
            Field::text("end", end.to_extended()),
        ],
        ValuePeriod::Duration { start, duration } => vec![
            Field::text("start", start.to_extended()),
            Field::text("duration", duration.to_string()),
        ],
    }
}

fn geo_fields(geo: &Geo) -> Vec<Field> {
    vec![
        Field::one("latitude", Scalar::Float(geo.latitude)),
        Field::one("longitude", Scalar::Float(geo.longitude)),
    ]
}

fn request_status_fields(status: &RequestStatus) -> Vec<Field> {
    let mut fields = vec![
        Field::text("code", status.code.clone()),
        Field::text("description", status.description.clone()),
    ];
    if let Some(data) = &status.data {
        fields.push(Field::text("data", data.clone()));
    }
    fields
}

fn recur_fields(rule: &ValueRecurrenceRule) -> Vec<Field> {
    fn ints(name: &'static str, list: &[i16]) -> Option<Field> {
        (!list.is_empty()).then(|| Field {
            name,
            value: FieldValue::List(list.iter().map(|&n| Scalar::Integer(n.into())).collect()),
        })
    }

    let mut fields = vec![Field::text("freq", rule.freq.to_string())];
    if let Some(until) = rule.until {
        fields.push(Field::text("until", until.to_extended()));
    }
    if let Some(count) = rule.count {
        fields.push(Field::one("count", Scalar::Integer(count.into())));
    }
    if rule.interval != 1 {
        fields.push(Field::one("interval", Scalar::Integer(rule.interval.into())));
    }

    fields.extend(ints("bysecond", &rule.by_second));
    fields.extend(ints("byminute", &rule.by_minute));
    fields.extend(ints("byhour", &rule.by_hour));
    if !rule.by_day.is_empty() {
        fields.push(Field {
            name: "byday",
            value: FieldValue::List(
                rule.by_day
                    .iter()
                    .map(|day| Scalar::Text(day.to_string()))
                    .collect(),
            ),
        });
    }
    fields.extend(ints("bymonthday", &rule.by_month_day));
    fields.extend(ints("byyearday", &rule.by_year_day));
    fields.extend(ints("byweekno", &rule.by_week_no));
    if !rule.by_month.is_empty() {
        // leap months only fit a string
        fields.push(Field {
            name: "bymonth",
            value: FieldValue::List(
                rule.by_month
                    .iter()
                    .map(|month| match month.leap {
                        true => Scalar::Text(month.to_string()),
                        false => Scalar::Integer(month.month.into()),
                    })
                    .collect(),
            ),
        });
    }
    fields.extend(ints("bysetpos", &rule.by_set_pos));
    if let Some(wkst) = rule.explicit_wkst() {
        fields.push(Field::text("wkst", wkst.to_string()));
    }
    fields
}
