// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) text serializer.

use std::io::{self, Write};

use crate::component::Component;
use crate::keyword::{KW_BEGIN, KW_END};
use crate::parameter::Parameter;
use crate::property::Property;

/// Maximum line length in octets before folding, excluding the CRLF.
const FOLD_AT: usize = 75;

/// Write a component tree as an iCalendar document.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_calendar<W: Write>(writer: W, calendar: &Component) -> io::Result<()> {
    let mut f = Formatter::new(writer);
    write_component(&mut f, calendar)?;
    f.flush()
}

/// Line writer that folds content lines longer than 75 octets.
///
/// Folds never split a UTF-8 sequence. A fold is CRLF followed by one space,
/// which unfolding removes again.
#[derive(Debug)]
pub struct Formatter<W: Write> {
    writer: W,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write one logical line, folded, followed by CRLF.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut rest = line;
        // the fold's leading space counts towards the limit
        let mut limit = FOLD_AT;
        loop {
            let end = rest
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .take_while(|&end| end <= limit)
                .last()
                .unwrap_or(rest.len());
            let (head, tail) = rest.split_at(end);
            self.writer.write_all(head.as_bytes())?;
            if tail.is_empty() {
                break;
            }

            self.writer.write_all(b"\r\n ")?;
            rest = tail;
            limit = FOLD_AT - 1;
        }
        self.writer.write_all(b"\r\n")
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn write_component<W: Write>(f: &mut Formatter<W>, component: &Component) -> io::Result<()> {
    let name = component.kind.name();
    f.write_line(&format!("{KW_BEGIN}:{name}"))?;

    for prop in &component.properties {
        f.write_line(&format_property(prop))?;
    }
    for child in &component.components {
        write_component(f, child)?;
    }

    f.write_line(&format!("{KW_END}:{name}"))
}

/// Format a property as one unfolded content line, without line ending.
fn format_property(prop: &Property) -> String {
    let mut line = prop.kind.name().to_owned();
    for param in &prop.parameters {
        write_parameter(&mut line, param);
    }

    line.push(':');
    for (i, value) in prop.values.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        line.push_str(&value.to_string());
    }
    line
}

/// Append `;NAME=value[,value...]`, quoting values where needed.
fn write_parameter(line: &mut String, param: &Parameter) {
    line.push(';');
    line.push_str(param.kind.name());
    line.push('=');
    for (i, value) in param.values.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        line.push_str(&quote_if_needed(value));
    }
}

fn quote_if_needed(s: &str) -> String {
    let needs_quoting = s
        .chars()
        .any(|c| c.is_ascii_control() || c == ';' || c == ':' || c == ',');

    if needs_quoting {
        format!("\"{s}\"")
    } else {
        s.to_owned()
    }
}
