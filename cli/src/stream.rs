// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io::Write};

use calfilter_ical::{Session, SessionOptions};
use colored::Colorize;
use tokio::io::{AsyncRead, AsyncReadExt};

/// How to drive one transcoding session.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub session: SessionOptions,
    pub chunk_size: usize,
    pub headers: bool,
}

/// Feed `reader` to a transcoding session chunk by chunk, writing to `sink`.
///
/// Returns the sink once the input is exhausted and the session finished.
#[tracing::instrument(skip_all, fields(chunk_size = options.chunk_size))]
pub async fn stream<R, W>(mut reader: R, sink: W, options: StreamOptions) -> Result<W, Box<dyn Error>>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut session = Session::new(sink, options.session);
    if options.headers {
        print_headers(&session);
    }

    let mut buf = vec![0; options.chunk_size.max(1)];
    let mut total = 0;
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        total += n;
        session.push(&buf[..n])?;
    }

    tracing::debug!(bytes = total, "input exhausted");
    Ok(session.finish()?)
}

fn print_headers<W: Write>(session: &Session<W>) {
    if let Some(content_type) = session.content_type() {
        eprintln!("{} {content_type}", "Content-Type:".bold());
    }
    if session.varies_on_accept() {
        eprintln!("{} Accept", "Vary:".bold());
    }
}
