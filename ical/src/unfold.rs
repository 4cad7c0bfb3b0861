// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Reassembly of folded content lines from a chunked byte stream.
//!
//! RFC 5545 Section 3.1 allows a long content line to be split by inserting
//! a line break followed by a single space or tab. The [`Unfolder`] undoes
//! this while bytes arrive in arbitrarily sized chunks: a line break and its
//! fold marker may be split across two chunks, and so may a CRLF pair or a
//! multi-byte UTF-8 sequence.

use std::mem;

/// Stateful line unfolder, fed one chunk at a time.
#[derive(Debug, Default)]
pub struct Unfolder {
    /// Bytes of the logical line being assembled.
    line: Vec<u8>,

    /// A run of CR/LF bytes was seen and the next byte decides between fold
    /// and end.
    seen_eol: bool,
}

impl Unfolder {
    /// Create an empty unfolder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning the logical lines it completes.
    ///
    /// The returned iterator is lazy: bytes are consumed as lines are pulled.
    /// Dropping it early leaves the rest of the chunk unread, so callers must
    /// drain it before pushing the next chunk.
    pub fn push<'u, 'c>(&'u mut self, chunk: &'c [u8]) -> Lines<'u, 'c> {
        Lines {
            unfolder: self,
            chunk,
            pos: 0,
        }
    }

    /// Signal end of input, returning the last logical line if any.
    pub fn finish(&mut self) -> Option<String> {
        self.seen_eol = false;
        self.take_line()
    }

    fn feed(&mut self, byte: u8) -> Option<String> {
        match byte {
            b'\r' | b'\n' => {
                self.seen_eol = true;
                None
            }
            b' ' | b'\t' if self.seen_eol => {
                // fold: drop the marker, keep appending to the current line
                self.seen_eol = false;
                None
            }
            _ => {
                let completed = if mem::take(&mut self.seen_eol) {
                    self.take_line()
                } else {
                    None
                };
                self.line.push(byte);
                completed
            }
        }
    }

    fn take_line(&mut self) -> Option<String> {
        if self.line.is_empty() {
            return None;
        }

        let bytes = mem::take(&mut self.line);
        Some(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!("content line is not valid UTF-8, replacing invalid sequences");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        })
    }
}

/// Iterator over the logical lines completed by one chunk.
#[derive(Debug)]
pub struct Lines<'u, 'c> {
    unfolder: &'u mut Unfolder,
    chunk: &'c [u8],
    pos: usize,
}

impl Iterator for Lines<'_, '_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&byte) = self.chunk.get(self.pos) {
            self.pos += 1;
            if let Some(line) = self.unfolder.feed(byte) {
                return Some(line);
            }
        }
        None
    }
}

/// Unfold a complete input in one go.
#[must_use]
pub fn unfold(src: &[u8]) -> Vec<String> {
    let mut unfolder = Unfolder::new();
    let mut lines: Vec<String> = unfolder.push(src).collect();
    lines.extend(unfolder.finish());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfold_chunked(src: &[u8], sizes: &[usize]) -> Vec<String> {
        let mut unfolder = Unfolder::new();
        let mut lines = Vec::new();
        let mut rest = src;
        let mut sizes = sizes.iter().cycle();
        while !rest.is_empty() {
            let n = (*sizes.next().unwrap()).min(rest.len());
            let (chunk, tail) = rest.split_at(n);
            lines.extend(unfolder.push(chunk));
            rest = tail;
        }
        lines.extend(unfolder.finish());
        lines
    }

    #[test]
    fn splits_lines_on_crlf() {
        let lines = unfold(b"BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n");
        assert_eq!(lines, ["BEGIN:VCALENDAR", "VERSION:2.0", "END:VCALENDAR"]);
    }

    #[test]
    fn joins_folded_lines() {
        let lines = unfold(b"DESCRIPTION:This is a lo\r\n ng description\r\n\tthat exists\r\n");
        assert_eq!(lines, ["DESCRIPTION:This is a long descriptionthat exists"]);
    }

    #[test]
    fn drops_only_one_fold_character() {
        let lines = unfold(b"SUMMARY:a\r\n  b\r\n");
        assert_eq!(lines, ["SUMMARY:a b"]);
    }

    #[test]
    fn accepts_bare_lf_and_cr() {
        let lines = unfold(b"A:1\nB:2\rC:3\n x");
        assert_eq!(lines, ["A:1", "B:2", "C:3x"]);
    }

    #[test]
    fn swallows_blank_lines() {
        let lines = unfold(b"\r\n\r\nA:1\r\n\r\n\r\nB:2\r\n\r\n");
        assert_eq!(lines, ["A:1", "B:2"]);
    }

    #[test]
    fn emits_last_line_without_terminator() {
        let lines = unfold(b"A:1\r\nB:2");
        assert_eq!(lines, ["A:1", "B:2"]);
    }

    #[test]
    fn chunk_boundaries_do_not_matter() {
        let src = "BEGIN:VEVENT\r\nSUMMARY:Caf\u{e9} r\u{e9}union\r\n  \u{e0} midi\r\nDESCRIPTION:a\r\n\tb\r\nEND:VEVENT\r\n"
            .as_bytes();
        let expected = unfold(src);
        for sizes in [&[1][..], &[2], &[3], &[5, 1], &[7, 2, 1], &[13]] {
            assert_eq!(unfold_chunked(src, sizes), expected, "sizes {sizes:?}");
        }
    }

    #[test]
    fn fold_split_between_chunks() {
        let mut unfolder = Unfolder::new();
        assert_eq!(unfolder.push(b"SUMMARY:ab\r").count(), 0);
        assert_eq!(unfolder.push(b"\n").count(), 0);
        assert_eq!(unfolder.push(b" cd\r\n").count(), 0);
        let lines: Vec<_> = unfolder.push(b"X").collect();
        assert_eq!(lines, ["SUMMARY:abcd"]);
        assert_eq!(unfolder.finish().as_deref(), Some("X"));
    }

    #[test]
    fn empty_input_yields_nothing() {
        let mut unfolder = Unfolder::new();
        assert_eq!(unfolder.push(b"").count(), 0);
        assert_eq!(unfolder.finish(), None);
    }
}
