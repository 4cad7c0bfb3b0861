// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Incremental builder for the component tree.
//!
//! # Algorithm
//!
//! The builder keeps a stack of open components:
//! 1. On BEGIN:X, push a new component onto the stack
//! 2. On property, add to the current component (top of stack)
//! 3. On END:X, pop from stack and add to parent component, or hand it out
//!    when the stack became empty

use crate::component::{Component, ComponentKind};
use crate::keyword::{KW_BEGIN, KW_END};
use crate::property::Property;
use crate::syntax::parse_content_line;

/// Builds components from unfolded content lines, one line at a time.
#[derive(Debug, Default)]
pub struct Builder {
    stack: Vec<Component>,
}

impl Builder {
    /// Create a builder with no open component.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one unfolded line.
    ///
    /// Returns the outermost component once its `END` line is seen.
    pub fn add_line(&mut self, line: &str) -> Option<Component> {
        if line.is_empty() {
            return None;
        }

        let line = match parse_content_line(line) {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(%err, line, "skipping malformed content line");
                return None;
            }
        };

        if line.name.eq_ignore_ascii_case(KW_BEGIN) {
            let kind = ComponentKind::from(line.value.trim());
            self.stack.push(Component::new(kind));
            None
        } else if line.name.eq_ignore_ascii_case(KW_END) {
            self.close(line.value.trim())
        } else {
            match self.stack.last_mut() {
                Some(top) => top.properties.push(Property::from_content_line(line)),
                None => tracing::warn!(name = line.name, "skipping property outside of any component"),
            }
            None
        }
    }

    fn close(&mut self, name: &str) -> Option<Component> {
        let Some(component) = self.stack.pop() else {
            tracing::warn!(name, "END without BEGIN");
            return None;
        };

        if ComponentKind::from(name) != component.kind {
            tracing::warn!(expected = %component.kind, found = name, "mismatched END, closing anyway");
        }

        match self.stack.last_mut() {
            Some(parent) => {
                parent.components.push(component);
                None
            }
            None => {
                tracing::debug!(kind = %component.kind, "component completed");
                Some(component)
            }
        }
    }

    /// Whether a component is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    /// End the input, discarding any component that was never closed.
    pub fn finish(self) {
        if let Some(root) = self.stack.first() {
            tracing::warn!(
                kind = %root.kind,
                depth = self.stack.len(),
                "input ended inside an open component, discarding it"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::property::PropertyKind;

    use super::*;

    fn build(lines: &[&str]) -> Vec<Component> {
        let mut builder = Builder::new();
        let roots = lines.iter().filter_map(|l| builder.add_line(l)).collect();
        builder.finish();
        roots
    }

    #[test]
    fn builds_nested_tree() {
        let roots = build(&[
            "BEGIN:VCALENDAR",
            "VERSION:2.0",
            "BEGIN:VEVENT",
            "SUMMARY:Meeting",
            "BEGIN:VALARM",
            "ACTION:DISPLAY",
            "END:VALARM",
            "END:VEVENT",
            "END:VCALENDAR",
        ]);

        assert_eq!(roots.len(), 1);
        let cal = &roots[0];
        assert_eq!(cal.kind, ComponentKind::Calendar);
        assert_eq!(cal.properties.len(), 1);
        assert_eq!(cal.properties[0].kind, PropertyKind::Version);

        let event = &cal.components[0];
        assert_eq!(event.kind, ComponentKind::Event);
        assert_eq!(event.properties[0].kind, PropertyKind::Summary);
        assert_eq!(event.components[0].kind, ComponentKind::Alarm);
    }

    #[test]
    fn emits_each_root() {
        let roots = build(&[
            "BEGIN:VCALENDAR",
            "END:VCALENDAR",
            "BEGIN:VCALENDAR",
            "END:VCALENDAR",
        ]);
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn tolerates_mismatched_end() {
        let roots = build(&[
            "BEGIN:VCALENDAR",
            "BEGIN:VEVENT",
            "END:VTODO",
            "END:VCALENDAR",
        ]);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].components[0].kind, ComponentKind::Event);
    }

    #[test]
    fn tolerates_stray_lines() {
        let roots = build(&[
            "END:VEVENT",
            "SUMMARY:orphan",
            "",
            "BEGIN:VCALENDAR",
            "no colon here",
            "X-FOO;X-BAR=1:baz",
            "END:VCALENDAR",
        ]);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].properties.len(), 1);
        assert_eq!(
            roots[0].properties[0].kind,
            PropertyKind::XName("X-FOO".to_owned())
        );
    }

    #[test]
    fn discards_unclosed() {
        let mut builder = Builder::new();
        assert_eq!(builder.add_line("BEGIN:VCALENDAR"), None);
        assert_eq!(builder.add_line("BEGIN:VEVENT"), None);
        assert!(builder.is_open());
        builder.finish();
    }
}
