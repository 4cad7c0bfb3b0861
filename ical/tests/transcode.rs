// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end sessions: negotiation, pass-through and streaming.

use calfilter_ical::{
    CONTENT_TYPE_JCAL, CONTENT_TYPE_XCAL, FilterMode, Formatting, OutputFormat, Session,
    SessionOptions, transcode, transcode_to_vec,
};
use serde_json::{Value as Json, json};

const CALENDAR: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:past\r\n\
DTEND:20230601T000000Z\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:upcoming\r\n\
DTEND:20250101T000000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

fn options() -> SessionOptions {
    SessionOptions::new("2024-01-01T00:00:00Z".parse().unwrap())
}

fn run(input: &str, options: SessionOptions) -> (String, Option<&'static str>) {
    let (out, content_type) = transcode_to_vec(input.as_bytes(), options).unwrap();
    (String::from_utf8(out).unwrap(), content_type)
}

#[test]
fn negotiates_jcal_from_accept() {
    let mut opts = options();
    opts.accept = Some("application/calendar+json".to_owned());
    let (out, content_type) = run(CALENDAR, opts);
    assert_eq!(content_type, Some(CONTENT_TYPE_JCAL));

    let doc: Json = serde_json::from_str(&out).unwrap();
    assert_eq!(
        doc,
        json!(["vcalendar", [["version", {}, "text", "2.0"]], [
            ["vevent", [
                ["uid", {}, "text", "upcoming"],
                ["dtend", {}, "date-time", "2025-01-01T00:00:00"]
            ], []]
        ]])
    );
}

#[test]
fn negotiates_xcal_with_parameters() {
    let mut opts = options();
    opts.accept = Some("application/calendar+xml; charset=utf-8".to_owned());
    opts.filter = FilterMode::Past;
    let (out, content_type) = run(CALENDAR, opts);
    assert_eq!(content_type, Some(CONTENT_TYPE_XCAL));
    assert!(out.contains("<uid><text>past</text></uid>"));
    assert!(!out.contains("upcoming"));
}

#[test]
fn query_overrides_defaults() {
    let mut opts = options();
    opts.output = OutputFormat::Jcal;
    opts.apply_query("filter=none&format=pretty");
    assert_eq!(opts.formatting, Formatting::Pretty);

    let (out, _) = run(CALENDAR, opts);
    assert!(out.starts_with("[\n  \"vcalendar\","));
    assert!(out.ends_with("]\n"));
    assert!(out.contains("\"past\""));
    assert!(out.contains("\"upcoming\""));
}

#[test]
fn passes_through_non_calendar_input() {
    let mut opts = options();
    opts.content_type = Some("text/html".to_owned());
    opts.accept = Some("application/calendar+json".to_owned());

    let input = "<html>BEGIN:VCALENDAR</html>";
    let (out, content_type) = run(input, opts);
    assert_eq!(out, input);
    assert_eq!(content_type, None);
}

#[test]
fn streams_multiple_calendars() {
    let mut opts = options();
    opts.filter = FilterMode::None;
    let mut session = Session::new(Vec::new(), opts);

    // split the second calendar inside a CRLF pair
    let input = format!("{CALENDAR}{CALENDAR}");
    let (head, tail) = input.split_at(CALENDAR.len() + 16);
    session.push(head.as_bytes()).unwrap();
    session.push(tail.as_bytes()).unwrap();
    let out = String::from_utf8(session.finish().unwrap()).unwrap();

    assert_eq!(out, format!("{CALENDAR}{CALENDAR}"));
}

#[test]
fn each_calendar_is_a_document() {
    let mut opts = options();
    opts.output = OutputFormat::Jcal;
    let input = format!("{CALENDAR}{CALENDAR}");
    let out = transcode(input.as_bytes(), Vec::new(), opts).unwrap();

    let docs: Vec<Json> = serde_json::Deserializer::from_slice(&out)
        .into_iter::<Json>()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0], docs[1]);
}

#[test]
fn recovers_from_malformed_lines() {
    let input = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
this is not a content line\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

    let mut opts = options();
    opts.filter = FilterMode::None;
    let (out, _) = run(input, opts);
    assert_eq!(out, "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n");
}
