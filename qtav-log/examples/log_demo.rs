// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Emits one message per severity, formatted and streamed.
//!
//! ```text
//! cargo run --example log_demo -- --level warning --tag "[demo] "
//! QTAV_LOG_LEVEL=debug cargo run --example log_demo -- --sink stderr
//! ```

mod common;

use clap::{Parser, ValueEnum};
use qtav_log::{LoggingContext, Severity, TracingSink, WriterSink};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SinkKind {
    /// Forward messages as tracing events.
    Tracing,
    /// Write plain lines to standard error.
    Stderr,
}

#[derive(Debug, Parser)]
#[command(version, about = "Exercise the qtav-log entry points")]
struct Args {
    /// Level to set before logging (off, fatal, critical, warning, debug, all or 0-5).
    /// QTAV_LOG_LEVEL still overrides it on the first call.
    #[arg(long)]
    level: Option<Severity>,

    /// Tag prepended to every message.
    #[arg(long)]
    tag: Option<String>,

    /// Where admitted messages go.
    #[arg(long, value_enum, default_value = "tracing")]
    sink: SinkKind,

    /// Message text used for every severity.
    #[arg(long, default_value = "frame 42 presented late")]
    message: String,

    /// Finish with a fatal message, which aborts the process.
    #[arg(long)]
    fatal: bool,
}

fn main() {
    common::setup_logging();
    let args = Args::parse();

    let builder = LoggingContext::builder();
    let builder = match args.sink {
        SinkKind::Tracing => builder.sink(TracingSink),
        SinkKind::Stderr => builder.sink(WriterSink::new(std::io::stderr())),
    };
    let builder = match args.tag {
        Some(tag) => builder.tag(tag),
        None => builder,
    };
    if qtav_log::install(builder.build()).is_err() {
        eprintln!("logging context was already installed");
    }

    if let Some(level) = args.level {
        qtav_log::set_log_level(level);
    }

    qtav_log::debug!("{} (debug)", args.message);
    qtav_log::warning!("{} (warning)", args.message);
    qtav_log::critical!("{} (critical)", args.message);

    qtav_log::debug!().append(&args.message).append("(debug stream)");
    qtav_log::warning!().append(&args.message).append("(warning stream)");
    qtav_log::critical!().append(&args.message).append("(critical stream)");

    info!(
        threshold = %qtav_log::log_level(),
        tag = %qtav_log::log_tag(),
        "effective logging configuration"
    );

    if args.fatal {
        qtav_log::fatal!("{} (fatal)", args.message);
    }
}
