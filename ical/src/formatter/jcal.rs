// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! jCal (RFC 7265) serializer.
//!
//! Components are `[name, properties, components]`, properties are
//! `[name, parameters, type, value...]`.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};
use serde_json::{Map, Value as Json, json};

use crate::component::Component;
use crate::encoding::{Body, Field, FieldValue, Scalar};
use crate::error::TranscodeError;
use crate::formatter::Formatting;
use crate::property::Property;
use crate::value::Value;

/// Write a component tree as a jCal document.
///
/// # Errors
///
/// Returns an error if the writer or the JSON serializer fails.
pub fn write_calendar<W: Write>(
    mut writer: W,
    calendar: &Component,
    formatting: Formatting,
) -> Result<(), TranscodeError> {
    let doc = component_to_json(calendar);
    match formatting {
        Formatting::None => serialize(&doc, &mut writer, CompactFormatter)?,
        Formatting::Spaced => serialize(&doc, &mut writer, SpacedFormatter)?,
        Formatting::Pretty => {
            serialize(&doc, &mut writer, PrettyFormatter::with_indent(b"  "))?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn serialize<W: Write, F: Formatter>(
    doc: &Json,
    writer: W,
    formatter: F,
) -> Result<(), serde_json::Error> {
    doc.serialize(&mut Serializer::with_formatter(writer, formatter))
}

/// Compact output with a space after every `,` and `:`.
#[derive(Debug, Clone, Copy)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

/// Build the jCal array of a component.
#[must_use]
pub fn component_to_json(component: &Component) -> Json {
    let properties: Vec<Json> = component.properties.iter().map(property_to_json).collect();
    let components: Vec<Json> = component.components.iter().map(component_to_json).collect();
    json!([component.kind.name().to_ascii_lowercase(), properties, components])
}

fn property_to_json(prop: &Property) -> Json {
    let parameters: Map<String, Json> = prop
        .parameters
        .iter()
        .map(|param| (param.kind.name().to_ascii_lowercase(), Json::String(param.joined())))
        .collect();

    let encoded: Vec<_> = prop.values.iter().map(Value::encode).collect();
    let json_type = encoded.first().map_or("unknown", |e| e.json_type);

    let mut array = vec![
        Json::String(prop.kind.name().to_ascii_lowercase()),
        Json::Object(parameters),
        Json::String(json_type.to_owned()),
    ];
    // multi-valued properties list every item after the type
    array.extend(encoded.into_iter().map(|e| body_to_json(e.body)));
    Json::Array(array)
}

fn body_to_json(body: Body) -> Json {
    match body {
        Body::Scalar(scalar) => scalar_to_json(scalar),
        Body::Choice(field) => field_to_json(field),
        Body::Tuple(fields) => Json::Array(fields.into_iter().map(field_to_json).collect()),
        Body::Record(fields) => Json::Object(
            fields
                .into_iter()
                .map(|field| (field.name.to_owned(), field_to_json(field)))
                .collect(),
        ),
    }
}

fn field_to_json(field: Field) -> Json {
    match field.value {
        FieldValue::One(scalar) => scalar_to_json(scalar),
        FieldValue::List(items) => Json::Array(items.into_iter().map(scalar_to_json).collect()),
    }
}

fn scalar_to_json(scalar: Scalar) -> Json {
    match scalar {
        Scalar::Text(s) => Json::String(s),
        Scalar::Boolean(b) => Json::Bool(b),
        Scalar::Integer(i) => Json::from(i),
        Scalar::Float(x) => Json::from(x),
    }
}
