// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! # qtav-log - logging for the media playback library
//!
//! A small logging facade: messages at four severities are gated by a
//! runtime-configurable level, prefixed with a user-settable tag and handed
//! to a pluggable [`Sink`] (by default, `tracing` events).
//!
//! ## Overview
//!
//! - **Severity**: ordered levels `Off < Fatal < Critical < Warning < Debug < All`
//!   ([`Severity`]). The configured level is a threshold: a call is emitted if
//!   the level is above `Off` and at least as verbose as the call, or is `All`.
//! - **Formatted calls**: [`debug!`], [`warning!`], [`critical!`] and
//!   [`fatal!`] take `format!`-style arguments. Arguments are only formatted
//!   when the message is admitted. `fatal!` always aborts the process.
//! - **Streaming calls**: `debug!()`, `warning!()` and `critical!()` with no
//!   arguments return a [`PendingMessage`] that collects fragments and is
//!   written when dropped. A rejected stream never opens the sink.
//! - **Bootstrap**: the first call reads `QTAV_LOG_LEVEL` and `QTAV_LOG_TAG`
//!   and prints a startup banner once, if logging is enabled.
//!
//! ## Architecture
//!
//! ```text
//! debug!/warning!/critical!/fatal!
//!        │
//!        ▼
//! LoggingContext ──► bootstrap (once: env + banner)
//!        │
//!        ├─► LevelGate ── rejected ──► return / disabled PendingMessage
//!        │
//!        └─► tag + message ──► Sink::emit / Sink::open_stream
//! ```
//!
//! ## Examples
//!
//! ```
//! use qtav_log::{Severity, critical, debug, warning};
//!
//! qtav_log::set_log_level(Severity::Warning);
//!
//! debug!("decoded {} frames", 42); // rejected, never formatted
//! warning!("audio clock drifted by {} ms", 12);
//! critical!().append("demuxer").append("lost sync at").append(1024);
//! ```
//!
//! Tests and embedders can build their own context instead of using the
//! process-wide one:
//!
//! ```
//! use qtav_log::{LoggingContext, NoopBanner, Severity, WriterSink};
//!
//! let sink = WriterSink::new(Vec::new());
//! let out = sink.writer();
//! let context = LoggingContext::builder()
//!     .sink(sink)
//!     .banner(NoopBanner)
//!     .env(|_| None)
//!     .level(Severity::Debug)
//!     .tag("[X]")
//!     .build();
//!
//! context.debug(format_args!("hi"));
//! assert_eq!(out.lock().unwrap().as_slice(), b"debug: [X]hi\n");
//! ```
//!
//! ## Thread Safety
//!
//! All state is synchronised: the level is atomic, the tag is behind a lock
//! and the bootstrap runs through [`std::sync::Once`]. Log calls may be made
//! from any thread.

mod banner;
mod context;
mod error;
mod gate;
mod pending;
mod severity;

pub mod config;
pub mod sink;

use std::{fmt, sync::OnceLock};

pub use banner::{BannerSource, BuildInfo, NoopBanner};
pub use config::LogConfig;
pub use context::{LoggingContext, LoggingContextBuilder};
pub use error::{Error, Result};
pub use gate::LevelGate;
pub use pending::PendingMessage;
pub use severity::Severity;
pub use sink::{NoopSink, Sink, SinkStream, TracingSink, WriterSink};

static GLOBAL: OnceLock<LoggingContext> = OnceLock::new();

/// Returns the process-wide context, creating the default one if needed.
///
/// The default context logs through [`TracingSink`], prints the
/// [`BuildInfo`] banner and reads the process environment.
pub fn global() -> &'static LoggingContext {
    GLOBAL.get_or_init(LoggingContext::new)
}

/// Makes `context` the process-wide context.
///
/// # Errors
///
/// Returns [`Error::AlreadyInstalled`] if a context was installed before or
/// the default one was already created by an earlier call.
pub fn install(context: LoggingContext) -> Result<()> {
    GLOBAL.set(context).map_err(|_| Error::AlreadyInstalled)
}

/// Returns the process-wide level.
pub fn log_level() -> Severity {
    global().level()
}

/// Sets the process-wide level.
///
/// Note that `QTAV_LOG_LEVEL`, when set, overrides this on the first log call.
pub fn set_log_level(level: Severity) {
    global().set_level(level);
}

/// Returns the process-wide tag.
pub fn log_tag() -> String {
    global().tag()
}

/// Sets the process-wide tag.
pub fn set_log_tag(tag: impl Into<String>) {
    global().set_tag(tag);
}

/// Logs a debug message through the process-wide context.
pub fn debug(args: fmt::Arguments<'_>) {
    global().debug(args);
}

/// Logs a warning through the process-wide context.
pub fn warning(args: fmt::Arguments<'_>) {
    global().warning(args);
}

/// Logs a critical error through the process-wide context.
pub fn critical(args: fmt::Arguments<'_>) {
    global().critical(args);
}

/// Logs a fatal error through the process-wide context and aborts.
pub fn fatal(args: fmt::Arguments<'_>) -> ! {
    global().fatal(args)
}

/// Starts a streaming debug message on the process-wide context.
pub fn debug_stream() -> PendingMessage {
    global().debug_stream()
}

/// Starts a streaming warning on the process-wide context.
pub fn warning_stream() -> PendingMessage {
    global().warning_stream()
}

/// Starts a streaming critical error on the process-wide context.
pub fn critical_stream() -> PendingMessage {
    global().critical_stream()
}

/// Logs a debug message, or starts a streaming one when called without
/// arguments.
///
/// ```
/// qtav_log::debug!("opened {}", "movie.mkv");
/// qtav_log::debug!().append("seek to").append(12.5);
/// ```
#[macro_export]
macro_rules! debug {
    () => {
        $crate::debug_stream()
    };
    ($($arg:tt)+) => {
        $crate::debug(::core::format_args!($($arg)+))
    };
}

/// Logs a warning, or starts a streaming one when called without arguments.
#[macro_export]
macro_rules! warning {
    () => {
        $crate::warning_stream()
    };
    ($($arg:tt)+) => {
        $crate::warning(::core::format_args!($($arg)+))
    };
}

/// Logs a critical error, or starts a streaming one when called without
/// arguments.
#[macro_export]
macro_rules! critical {
    () => {
        $crate::critical_stream()
    };
    ($($arg:tt)+) => {
        $crate::critical(::core::format_args!($($arg)+))
    };
}

/// Logs a fatal error and aborts the process.
///
/// There is no streaming form.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::fatal(::core::format_args!($($arg)+))
    };
}
