// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Streaming transcoding sessions.
//!
//! A [`Session`] owns all state of one transcoding pass: the unfolder, the
//! open component stack and the output sink. Input arrives in chunks of any
//! size; each calendar is filtered, serialized and flushed as soon as its
//! `END` line is complete, that is once the next byte shows it is not folded
//! or the input ends.

use std::io::Write;
use std::str::FromStr;

use jiff::Timestamp;
use strum::IntoEnumIterator;

use crate::builder::Builder;
use crate::component::Component;
use crate::error::{ParseOptionError, TranscodeError};
use crate::filter::{FilterMode, filter};
use crate::formatter::{Formatting, ical, jcal, xcal};
use crate::unfold::Unfolder;

/// Media type of iCalendar text.
pub const CONTENT_TYPE_ICAL: &str = "text/calendar";

/// Media type of xCal.
pub const CONTENT_TYPE_XCAL: &str = "application/calendar+xml";

/// Media type of jCal.
pub const CONTENT_TYPE_JCAL: &str = "application/calendar+json";

/// Output representation of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Chosen from the client preference, iCalendar when nothing matches.
    #[default]
    Negotiate,

    /// iCalendar text (RFC 5545).
    Ical,

    /// XML (RFC 6321).
    Xcal,

    /// JSON (RFC 7265).
    Jcal,
}

impl OutputFormat {
    /// Choose a format from a client preference such as an `Accept` header.
    ///
    /// Media ranges are scanned left to right, parameters ignored, and the
    /// first calendar type wins.
    #[must_use]
    pub fn negotiate(accept: Option<&str>) -> Self {
        accept
            .into_iter()
            .flat_map(|accept| accept.split(','))
            .find_map(|range| {
                let media_type = range.split(';').next().unwrap_or_default().trim();
                [Self::Ical, Self::Xcal, Self::Jcal]
                    .into_iter()
                    .find(|format| format.content_type().is_some_and(|ct| ct.eq_ignore_ascii_case(media_type)))
            })
            .unwrap_or(Self::Ical)
    }

    /// The media type of documents in this format.
    #[must_use]
    pub const fn content_type(self) -> Option<&'static str> {
        match self {
            Self::Negotiate => None,
            Self::Ical => Some(CONTENT_TYPE_ICAL),
            Self::Xcal => Some(CONTENT_TYPE_XCAL),
            Self::Jcal => Some(CONTENT_TYPE_JCAL),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|format| format.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError::new("output", s, "negotiate, ical, xcal, jcal"))
    }
}

/// Settings of one session, supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Output representation.
    pub output: OutputFormat,

    /// Which sub-components to keep.
    pub filter: FilterMode,

    /// Whitespace of xCal and jCal output.
    pub formatting: Formatting,

    /// Reference instant of the filter.
    pub now: Timestamp,

    /// Client preference used when the output is negotiated.
    pub accept: Option<String>,

    /// Declared media type of the input.
    pub content_type: Option<String>,
}

impl SessionOptions {
    /// Default options filtering against `now`.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            output: OutputFormat::default(),
            filter: FilterMode::default(),
            formatting: Formatting::default(),
            now,
            accept: None,
            content_type: Some(CONTENT_TYPE_ICAL.to_owned()),
        }
    }

    /// Override filter and formatting from a query string such as
    /// `filter=past&format=pretty`.
    ///
    /// Unknown keys and values are ignored.
    pub fn apply_query(&mut self, query: &str) {
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                tracing::warn!(pair, "ignoring query parameter without a value");
                continue;
            };

            let applied = match key {
                "filter" => value.parse().map(|mode| self.filter = mode),
                "format" => value.parse().map(|format| self.formatting = format),
                _ => {
                    tracing::warn!(key, "ignoring unknown query parameter");
                    continue;
                }
            };
            if let Err(err) = applied {
                tracing::warn!(%err, "ignoring query parameter");
            }
        }
    }

    /// Whether the input must be passed through untouched.
    ///
    /// Negotiated sessions only transcode input declared as iCalendar.
    fn is_pass_through(&self) -> bool {
        if self.output != OutputFormat::Negotiate {
            return false;
        }

        let media_type = self
            .content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(str::trim);
        !media_type.is_some_and(|ct| ct.eq_ignore_ascii_case(CONTENT_TYPE_ICAL))
    }
}

/// One transcoding pass from chunked iCalendar input to a sink.
#[derive(Debug)]
pub struct Session<W: Write> {
    sink: W,
    state: State,
    render: Render,
    vary_accept: bool,
}

#[derive(Debug)]
enum State {
    PassThrough,
    Transcode { unfolder: Unfolder, builder: Builder },
}

#[derive(Debug, Clone, Copy)]
struct Render {
    output: OutputFormat,
    filter: FilterMode,
    formatting: Formatting,
    now: Timestamp,
}

impl<W: Write> Session<W> {
    /// Start a session writing to `sink`.
    pub fn new(sink: W, options: SessionOptions) -> Self {
        if options.is_pass_through() {
            tracing::warn!(
                content_type = options.content_type.as_deref().unwrap_or_default(),
                "input is not text/calendar, passing it through"
            );
            return Self {
                sink,
                state: State::PassThrough,
                render: Render::from_options(&options, options.output),
                vary_accept: false,
            };
        }

        let (output, vary_accept) = match options.output {
            OutputFormat::Negotiate => (OutputFormat::negotiate(options.accept.as_deref()), true),
            output => (output, false),
        };
        tracing::debug!(%output, filter = %options.filter, "starting session");

        Self {
            sink,
            state: State::Transcode {
                unfolder: Unfolder::new(),
                builder: Builder::new(),
            },
            render: Render::from_options(&options, output),
            vary_accept,
        }
    }

    /// Media type of the output, `None` when passing through.
    #[must_use]
    pub fn content_type(&self) -> Option<&'static str> {
        match self.state {
            State::PassThrough => None,
            State::Transcode { .. } => self.render.output.content_type(),
        }
    }

    /// Whether the output depends on the client preference.
    #[must_use]
    pub fn varies_on_accept(&self) -> bool {
        self.vary_accept
    }

    /// Whether input is copied to the sink unmodified.
    #[must_use]
    pub fn is_pass_through(&self) -> bool {
        matches!(self.state, State::PassThrough)
    }

    /// Consume one chunk of input, writing every calendar it completes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the sink fails. The session should be
    /// dropped afterwards.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), TranscodeError> {
        match &mut self.state {
            State::PassThrough => self.sink.write_all(chunk)?,
            State::Transcode { unfolder, builder } => {
                for line in unfolder.push(chunk) {
                    if let Some(root) = builder.add_line(&line) {
                        self.render.write(&mut self.sink, root)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// End the input and return the sink.
    ///
    /// A trailing line without a line break is still processed. Components
    /// left open are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the sink fails.
    pub fn finish(mut self) -> Result<W, TranscodeError> {
        if let State::Transcode { mut unfolder, mut builder } = self.state {
            if let Some(root) = unfolder.finish().and_then(|line| builder.add_line(&line)) {
                self.render.write(&mut self.sink, root)?;
            }
            builder.finish();
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}

impl Render {
    fn from_options(options: &SessionOptions, output: OutputFormat) -> Self {
        Self {
            output,
            filter: options.filter,
            formatting: options.formatting,
            now: options.now,
        }
    }

    fn write<W: Write>(&self, sink: &mut W, mut root: Component) -> Result<(), TranscodeError> {
        filter(&mut root, self.filter, self.now);
        match self.output {
            OutputFormat::Xcal => xcal::write_calendar(&mut *sink, &root, self.formatting)?,
            OutputFormat::Jcal => jcal::write_calendar(&mut *sink, &root, self.formatting)?,
            // negotiation is resolved before any output is written
            OutputFormat::Ical | OutputFormat::Negotiate => ical::write_calendar(&mut *sink, &root)?,
        }
        sink.flush()?;
        tracing::debug!(kind = %root.kind, output = %self.output, "flushed calendar");
        Ok(())
    }
}

/// Transcode a complete input in one go.
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
pub fn transcode<W: Write>(
    input: &[u8],
    sink: W,
    options: SessionOptions,
) -> Result<W, TranscodeError> {
    let mut session = Session::new(sink, options);
    session.push(input)?;
    session.finish()
}

/// Convenience wrapper writing into a `Vec`, reporting the content type.
///
/// # Errors
///
/// Returns an error if the serializers fail.
pub fn transcode_to_vec(
    input: &[u8],
    options: SessionOptions,
) -> Result<(Vec<u8>, Option<&'static str>), TranscodeError> {
    let mut session = Session::new(Vec::new(), options);
    let content_type = session.content_type();
    session.push(input)?;
    Ok((session.finish()?, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALENDAR: &str = "BEGIN:VCALENDAR\r\n\
        VERSION:2.0\r\n\
        BEGIN:VEVENT\r\n\
        UID:old\r\n\
        DTEND:20230101T000000Z\r\n\
        END:VEVENT\r\n\
        BEGIN:VEVENT\r\n\
        UID:new\r\n\
        DTEND:20250101T000000Z\r\n\
        END:VEVENT\r\n\
        END:VCALENDAR\r\n";

    fn options() -> SessionOptions {
        SessionOptions::new("2024-01-01T00:00:00Z".parse().unwrap())
    }

    #[test]
    fn parses_output_names() {
        assert_eq!("jcal".parse::<OutputFormat>(), Ok(OutputFormat::Jcal));
        assert_eq!("XCAL".parse::<OutputFormat>(), Ok(OutputFormat::Xcal));
        assert!("json".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn negotiates_output() {
        assert_eq!(OutputFormat::negotiate(None), OutputFormat::Ical);
        assert_eq!(
            OutputFormat::negotiate(Some("application/calendar+json")),
            OutputFormat::Jcal
        );
        assert_eq!(
            OutputFormat::negotiate(Some("text/html, application/calendar+xml;q=0.9, */*")),
            OutputFormat::Xcal
        );
        assert_eq!(OutputFormat::negotiate(Some("text/html")), OutputFormat::Ical);
    }

    #[test]
    fn applies_query() {
        let mut opts = options();
        opts.apply_query("filter=past&format=pretty&other=1&broken");
        assert_eq!(opts.filter, FilterMode::Past);
        assert_eq!(opts.formatting, Formatting::Pretty);

        opts.apply_query("filter=sometime&format=");
        assert_eq!(opts.filter, FilterMode::Past);
        assert_eq!(opts.formatting, Formatting::Pretty);
    }

    #[test]
    fn passes_through_other_content() {
        let mut opts = options();
        opts.content_type = Some("text/plain".to_owned());
        let (out, content_type) = transcode_to_vec(b"hello\r\nworld", opts).unwrap();
        assert_eq!(out, b"hello\r\nworld");
        assert_eq!(content_type, None);

        let mut opts = options();
        opts.content_type = None;
        let session = Session::new(Vec::new(), opts);
        assert!(session.is_pass_through());
    }

    #[test]
    fn accepts_content_type_parameters() {
        let mut opts = options();
        opts.content_type = Some("Text/Calendar; charset=utf-8".to_owned());
        let session = Session::new(Vec::new(), opts);
        assert!(!session.is_pass_through());
        assert!(session.varies_on_accept());
        assert_eq!(session.content_type(), Some(CONTENT_TYPE_ICAL));
    }

    #[test]
    fn explicit_output_skips_negotiation() {
        let mut opts = options();
        opts.output = OutputFormat::Jcal;
        opts.content_type = None;
        let session = Session::new(Vec::new(), opts);
        assert!(!session.is_pass_through());
        assert!(!session.varies_on_accept());
        assert_eq!(session.content_type(), Some(CONTENT_TYPE_JCAL));
    }

    #[test]
    fn transcodes_with_default_filter() {
        let (out, _) = transcode_to_vec(CALENDAR.as_bytes(), options()).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("UID:new\r\n"));
        assert!(!out.contains("UID:old"));
    }

    #[test]
    fn flushes_each_calendar() {
        let mut session = Session::new(Vec::new(), options());
        session.push(CALENDAR.as_bytes()).unwrap();
        // the END line could still be folded
        assert!(session.sink.is_empty());

        session.push(b"B").unwrap();
        assert!(session.sink.ends_with(b"END:VCALENDAR\r\n"));
        assert_eq!(String::from_utf8_lossy(&session.sink).matches("BEGIN:VCALENDAR").count(), 1);

        session.push(&CALENDAR.as_bytes()[1..]).unwrap();
        let out = String::from_utf8(session.finish().unwrap()).unwrap();
        assert_eq!(out.matches("BEGIN:VCALENDAR").count(), 2);
    }

    #[test]
    fn folded_end_line_is_not_flushed_early() {
        let mut session = Session::new(Vec::new(), options());
        session.push(b"BEGIN:VCALENDAR\r\nEND:VCAL\r\n").unwrap();
        session.push(b" ENDAR\r\n").unwrap();
        assert!(session.sink.is_empty());

        let out = String::from_utf8(session.finish().unwrap()).unwrap();
        assert_eq!(out, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
    }

    #[test]
    fn processes_trailing_line() {
        let input = CALENDAR.trim_end();
        let (out, _) = transcode_to_vec(input.as_bytes(), options()).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn discards_unclosed_calendar() {
        let (out, _) = transcode_to_vec(b"BEGIN:VCALENDAR\r\nVERSION:2.0\r\n", options()).unwrap();
        assert!(out.is_empty());
    }
}
