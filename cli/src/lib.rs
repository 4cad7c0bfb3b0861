// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line host for the calfilter transcoder.

mod cli;
mod config;
mod stream;

pub use crate::cli::{APP_NAME, Cli, DEFAULT_CHUNK_SIZE, run};
pub use crate::config::{Config, parse_config};
pub use crate::stream::{StreamOptions, stream};
