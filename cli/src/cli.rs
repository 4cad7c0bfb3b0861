// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf, process::ExitCode, str::FromStr};

use calfilter_ical::{FilterMode, Formatting, OutputFormat, SessionOptions};
use clap::{
    Arg, ArgAction, ArgMatches, Command, ValueHint, arg, builder::styling, crate_version,
    value_parser,
};
use colored::Colorize;
use jiff::Timestamp;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, parse_config};
use crate::stream::{StreamOptions, stream};

/// Name of the application, also used for the configuration directory.
pub const APP_NAME: &str = "calfilter";

/// Bytes read from the input per chunk unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Run the calfilter command-line interface.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    // stdout carries the document, so logs go to stderr
    let filter = if debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Input file, stdin when `None`
    pub input: Option<PathBuf>,

    /// Output format
    pub output: Option<OutputFormat>,

    /// Filter mode
    pub filter: Option<FilterMode>,

    /// Formatting of xCal and jCal output
    pub format: Option<Formatting>,

    /// Client preference used for negotiation
    pub accept: Option<String>,

    /// Declared media type of the input
    pub content_type: Option<String>,

    /// Query string such as `filter=past&format=pretty`
    pub query: Option<String>,

    /// Reference instant of the filter, the current time when `None`
    pub now: Option<Timestamp>,

    /// Bytes per read
    pub chunk_size: Option<usize>,

    /// Print the media type of the output to stderr
    pub headers: bool,

    /// Enable debug logging
    pub debug: bool,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Filter an iCalendar stream and transcode it to iCalendar, xCal or jCal.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .arg(
                arg!([INPUT] "Input file, stdin when omitted or `-`")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("CONFIG")
                    .help("Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $CALFILTER_CONFIG, then \
$XDG_CONFIG_HOME/calfilter/config.toml on Linux and MacOS, %LOCALAPPDATA%/calfilter/config.toml \
on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FORMAT")
                    .help("Output format: negotiate, ical, xcal, jcal")
                    .value_parser(OutputFormat::from_str),
            )
            .arg(
                Arg::new("filter")
                    .short('f')
                    .long("filter")
                    .value_name("MODE")
                    .help("Components to keep: none, next, last, future, past")
                    .value_parser(FilterMode::from_str),
            )
            .arg(
                Arg::new("format")
                    .long("format")
                    .value_name("FORMATTING")
                    .help("Whitespace of xCal and jCal output: none, spaced, pretty")
                    .value_parser(Formatting::from_str),
            )
            .arg(
                Arg::new("accept")
                    .short('a')
                    .long("accept")
                    .value_name("MEDIA_TYPES")
                    .help("Accepted media types when the output is negotiated"),
            )
            .arg(
                Arg::new("content-type")
                    .long("content-type")
                    .value_name("MEDIA_TYPE")
                    .help("Declared media type of the input [default: text/calendar]"),
            )
            .arg(
                Arg::new("query")
                    .short('q')
                    .long("query")
                    .value_name("QUERY")
                    .help("Query string overriding filter and format, e.g. filter=past&format=pretty"),
            )
            .arg(
                Arg::new("now")
                    .long("now")
                    .value_name("TIMESTAMP")
                    .help("Reference instant of the filter, RFC 3339 [default: current time]")
                    .value_parser(Timestamp::from_str),
            )
            .arg(
                Arg::new("chunk-size")
                    .long("chunk-size")
                    .value_name("BYTES")
                    .help("Bytes read from the input at a time")
                    .value_parser(value_parser!(usize)),
            )
            .arg(
                Arg::new("headers")
                    .short('H')
                    .long("headers")
                    .help("Print the content type of the output to stderr")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("debug")
                    .long("debug")
                    .help("Enable debug logging")
                    .action(ArgAction::SetTrue),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Self {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Ok(Self::from(&matches))
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            input: matches
                .get_one::<PathBuf>("INPUT")
                .filter(|path| path.as_os_str() != "-")
                .cloned(),
            output: matches.get_one("output").copied(),
            filter: matches.get_one("filter").copied(),
            format: matches.get_one("format").copied(),
            accept: matches.get_one("accept").cloned(),
            content_type: matches.get_one("content-type").cloned(),
            query: matches.get_one("query").cloned(),
            now: matches.get_one("now").copied(),
            chunk_size: matches.get_one("chunk-size").copied(),
            headers: matches.get_flag("headers"),
            debug: matches.get_flag("debug"),
        }
    }

    /// Run the transcoder
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("parsing configuration...");
        let config = parse_config(self.config.clone()).await?;

        let options = StreamOptions {
            session: self.session_options(&config),
            chunk_size: self
                .chunk_size
                .or(config.chunk_size)
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            headers: self.headers,
        };

        let stdout = std::io::stdout();
        match &self.input {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
                stream(file, stdout, options).await?;
            }
            None => {
                stream(tokio::io::stdin(), stdout, options).await?;
            }
        }
        Ok(())
    }

    /// Combine configuration, query string and flags, in increasing priority.
    pub fn session_options(&self, config: &Config) -> SessionOptions {
        let mut options = SessionOptions::new(self.now.unwrap_or_else(Timestamp::now));
        if let Some(output) = config.output {
            options.output = output;
        }
        if let Some(filter) = config.filter {
            options.filter = filter;
        }
        if let Some(format) = config.format {
            options.formatting = format;
        }

        if let Some(query) = &self.query {
            options.apply_query(query);
        }

        if let Some(output) = self.output {
            options.output = output;
        }
        if let Some(filter) = self.filter {
            options.filter = filter;
        }
        if let Some(format) = self.format {
            options.formatting = format;
        }
        options.accept.clone_from(&self.accept);
        if let Some(content_type) = &self.content_type {
            options.content_type = Some(content_type.clone());
        }
        options
    }
}
