// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! xCal (RFC 6321) serializer.
//!
//! ```xml
//! <icalendar xmlns="urn:ietf:params:xml:ns:icalendar-2.0">
//!   <vcalendar>
//!     <properties>
//!       <prodid><text>-//Example//EN</text></prodid>
//!     </properties>
//!     <components>...</components>
//!   </vcalendar>
//! </icalendar>
//! ```

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::component::Component;
use crate::encoding::{Body, Field, FieldValue, Scalar};
use crate::formatter::Formatting;
use crate::property::Property;
use crate::value::Value;

/// Namespace of the xCal root element.
pub const XCAL_NAMESPACE: &str = "urn:ietf:params:xml:ns:icalendar-2.0";

/// Write a component tree as an xCal document.
///
/// `Spaced` and `Pretty` both indent by two spaces.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_calendar<W: Write>(
    writer: W,
    calendar: &Component,
    formatting: Formatting,
) -> io::Result<()> {
    let mut writer = match formatting {
        Formatting::None => Writer::new(writer),
        Formatting::Spaced | Formatting::Pretty => Writer::new_with_indent(writer, b' ', 2),
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("icalendar");
    root.push_attribute(("xmlns", XCAL_NAMESPACE));
    writer.write_event(Event::Start(root))?;
    write_component(&mut writer, calendar)?;
    writer.write_event(Event::End(BytesEnd::new("icalendar")))?;

    if formatting != Formatting::None {
        writer.get_mut().write_all(b"\n")?;
    }
    writer.get_mut().flush()
}

fn write_component<W: Write>(writer: &mut Writer<W>, component: &Component) -> io::Result<()> {
    let name = component.kind.name().to_ascii_lowercase();
    start(writer, &name)?;

    if !component.properties.is_empty() {
        start(writer, "properties")?;
        for prop in &component.properties {
            write_property(writer, prop)?;
        }
        end(writer, "properties")?;
    }

    if !component.components.is_empty() {
        start(writer, "components")?;
        for child in &component.components {
            write_component(writer, child)?;
        }
        end(writer, "components")?;
    }

    end(writer, &name)
}

fn write_property<W: Write>(writer: &mut Writer<W>, prop: &Property) -> io::Result<()> {
    let name = prop.kind.name().to_ascii_lowercase();
    start(writer, &name)?;

    if !prop.parameters.is_empty() {
        start(writer, "parameters")?;
        for param in &prop.parameters {
            let param_name = param.kind.name().to_ascii_lowercase();
            text_element(writer, &param_name, &param.joined())?;
        }
        end(writer, "parameters")?;
    }

    // multi-valued properties get one value element per item
    for value in &prop.values {
        write_value(writer, value)?;
    }

    end(writer, &name)
}

fn write_value<W: Write>(writer: &mut Writer<W>, value: &Value) -> io::Result<()> {
    let encoded = value.encode();
    match &encoded.body {
        Body::Scalar(scalar) => text_element(writer, encoded.element, &scalar.to_string()),
        Body::Choice(field) => {
            start(writer, encoded.element)?;
            write_field(writer, field)?;
            end(writer, encoded.element)
        }
        Body::Tuple(fields) | Body::Record(fields) => {
            start(writer, encoded.element)?;
            for field in fields {
                write_field(writer, field)?;
            }
            end(writer, encoded.element)
        }
    }
}

fn write_field<W: Write>(writer: &mut Writer<W>, field: &Field) -> io::Result<()> {
    match &field.value {
        FieldValue::One(scalar) => text_element(writer, field.name, &scalar.to_string()),
        FieldValue::List(items) => items
            .iter()
            .map(Scalar::to_string)
            .try_for_each(|item| text_element(writer, field.name, &item)),
    }
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> io::Result<()> {
    start(writer, name)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))
}

#[cfg(test)]
mod tests {
    use crate::component::ComponentKind;
    use crate::syntax::parse_content_line;

    use super::*;

    fn calendar(lines: &[&str]) -> Component {
        let mut event = Component::new(ComponentKind::Event);
        for line in lines {
            let line = parse_content_line(line).unwrap();
            event.properties.push(Property::from_content_line(line));
        }
        let mut cal = Component::new(ComponentKind::Calendar);
        cal.components.push(event);
        cal
    }

    fn to_string(cal: &Component, formatting: Formatting) -> String {
        let mut out = Vec::new();
        write_calendar(&mut out, cal, formatting).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_document_skeleton() {
        let xml = to_string(&Component::new(ComponentKind::Calendar), Formatting::None);
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?><icalendar xmlns="urn:ietf:params:xml:ns:icalendar-2.0"><vcalendar></vcalendar></icalendar>"#
        );
    }

    #[test]
    fn writes_properties_and_parameters() {
        let cal = calendar(&["DTSTART;TZID=Europe/Berlin:20250101T090000", "SUMMARY:a & b"]);
        let xml = to_string(&cal, Formatting::None);
        assert!(xml.contains(
            "<vevent><properties><dtstart><parameters><tzid>Europe/Berlin</tzid></parameters>\
             <date-time>2025-01-01T09:00:00</date-time></dtstart>"
        ));
        assert!(xml.contains("<summary><text>a &amp; b</text></summary>"));
    }

    #[test]
    fn writes_composite_values() {
        let cal = calendar(&[
            "GEO:37.5;-122.25",
            "TRIGGER:-PT15M",
            "RRULE:FREQ=WEEKLY;BYDAY=MO,2TU;WKST=SU",
            "REQUEST-STATUS:2.0;Success",
        ]);
        let xml = to_string(&cal, Formatting::None);
        assert!(xml.contains(
            "<geo><geo><latitude>37.5</latitude><longitude>-122.25</longitude></geo></geo>"
        ));
        assert!(xml.contains("<trigger><trigger><duration>-PT15M</duration></trigger></trigger>"));
        assert!(xml.contains(
            "<rrule><recur><freq>WEEKLY</freq><byday>MO</byday><byday>2TU</byday>\
             <wkst>SU</wkst></recur></rrule>"
        ));
        assert!(xml.contains(
            "<request-status><request-status><code>2.0</code>\
             <description>Success</description></request-status></request-status>"
        ));
    }

    #[test]
    fn splits_multi_valued() {
        let cal = calendar(&["CATEGORIES:A,B,C"]);
        let xml = to_string(&cal, Formatting::None);
        assert!(xml.contains("<categories><text>A</text><text>B</text><text>C</text></categories>"));
    }

    #[test]
    fn indents_pretty() {
        let cal = calendar(&["UID:1"]);
        let xml = to_string(&cal, Formatting::Pretty);
        assert!(xml.contains("\n  <vcalendar>\n    <components>\n      <vevent>"));
        assert_eq!(xml, to_string(&cal, Formatting::Spaced));
    }
}
