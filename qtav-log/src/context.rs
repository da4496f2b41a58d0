// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Logging context: the level, the tag, the one-time bootstrap and the sink.
//!
//! A [`LoggingContext`] owns all the state the logging calls need. The
//! process-wide functions in the crate root forward to a single shared
//! context, but contexts can also be created and passed around explicitly,
//! which is how the tests inject fake sinks and environments.

use std::{
    fmt::{self, Write as _},
    io,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Once, PoisonError, RwLock},
};

use tracing::trace;

use crate::{
    LevelGate, LogConfig, PendingMessage, Severity,
    banner::{BannerSource, BuildInfo},
    config::{EnvLookup, process_env},
    sink::{Sink, TracingSink},
};

/// Shared logging state and the entry points that use it.
///
/// The context is `Send + Sync`; every method takes `&self`. The level is an
/// atomic and the tag sits behind a lock, so concurrent setters and log calls
/// are safe.
///
/// The first log call of any kind runs the bootstrap: it reads
/// `QTAV_LOG_LEVEL` and `QTAV_LOG_TAG` (overriding earlier
/// [`set_level`](Self::set_level)/[`set_tag`](Self::set_tag) calls) and, if
/// the resulting level is above [`Severity::Off`], prints the startup banner
/// to standard output. The bootstrap runs exactly once per context, even when
/// several threads log at the same time.
pub struct LoggingContext {
    gate: LevelGate,
    tag: RwLock<String>,
    bootstrap: Once,
    sink: Arc<dyn Sink>,
    banner: Arc<dyn BannerSource>,
    env: Box<EnvLookup>,
}

impl LoggingContext {
    /// Creates a context with the default sink, banner and environment.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for a customised context.
    pub fn builder() -> LoggingContextBuilder {
        LoggingContextBuilder::default()
    }

    /// Returns the current level.
    pub fn level(&self) -> Severity {
        self.gate.level()
    }

    /// Sets the level. Takes effect for the next call on any thread.
    pub fn set_level(&self, level: Severity) {
        self.gate.set_level(level);
    }

    /// Returns a copy of the current tag.
    pub fn tag(&self) -> String {
        self.tag.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replaces the tag prepended to every message.
    pub fn set_tag(&self, tag: impl Into<String>) {
        *self.tag.write().unwrap_or_else(PoisonError::into_inner) = tag.into();
    }

    /// Returns `true` if a call at `severity` would currently be emitted.
    ///
    /// This does not run the bootstrap.
    pub fn should_emit(&self, severity: Severity) -> bool {
        self.gate.should_emit(severity)
    }

    /// Snapshot of the current level and tag.
    pub fn config(&self) -> LogConfig {
        let tag = self.tag();
        LogConfig {
            level: Some(self.level()),
            tag: (!tag.is_empty()).then_some(tag),
        }
    }

    /// Runs the one-time environment bootstrap if it has not run yet.
    ///
    /// Every logging entry point calls this first. Calling it directly is
    /// only useful to apply the environment before querying
    /// [`level`](Self::level).
    ///
    /// A panic raised by the environment lookup or the banner source is
    /// contained here: the bootstrap counts as done and logging carries on
    /// with whatever level and tag were already in effect.
    pub fn bootstrap(&self) {
        self.bootstrap.call_once(|| {
            if panic::catch_unwind(AssertUnwindSafe(|| self.configure())).is_err() {
                trace!(
                    target: "qtav_log::bootstrap",
                    "bootstrap panicked, keeping current settings"
                );
            }
        });
    }

    fn configure(&self) {
        let config = LogConfig::from_lookup(|name| (self.env)(name));
        config.apply_to(self);
        trace!(
            target: "qtav_log::bootstrap",
            threshold = %self.level(),
            tagged = config.tag.is_some(),
            "logging configured"
        );

        if self.level() > Severity::Off {
            let mut stdout = io::stdout().lock();
            let _ = self.banner.write_banner(&mut stdout);
        }
    }

    /// Logs a debug message.
    ///
    /// Usually called through the [`debug!`](crate::debug!) macro. The
    /// arguments are only formatted if the message is admitted.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args);
    }

    /// Logs a warning.
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warning, args);
    }

    /// Logs a critical error.
    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Critical, args);
    }

    /// Logs a fatal error and aborts the process.
    ///
    /// The message is emitted only if the level admits fatal messages, but
    /// the process is aborted either way.
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.bootstrap();
        if self.should_emit(Severity::Fatal) {
            self.emit(Severity::Fatal, args);
        }
        std::process::abort()
    }

    /// Starts a streaming debug message.
    ///
    /// If debug messages are currently rejected the sink is not touched and
    /// the returned message is disabled.
    pub fn debug_stream(&self) -> PendingMessage {
        self.stream(Severity::Debug)
    }

    /// Starts a streaming warning.
    pub fn warning_stream(&self) -> PendingMessage {
        self.stream(Severity::Warning)
    }

    /// Starts a streaming critical error.
    pub fn critical_stream(&self) -> PendingMessage {
        self.stream(Severity::Critical)
    }

    fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        self.bootstrap();
        if self.should_emit(severity) {
            self.emit(severity, args);
        }
    }

    fn emit(&self, severity: Severity, args: fmt::Arguments<'_>) {
        let mut message = self.tag();
        // Writing into a String only fails if a Display impl does.
        let _ = message.write_fmt(args);
        self.sink.emit(severity, &message);
    }

    fn stream(&self, severity: Severity) -> PendingMessage {
        self.bootstrap();
        if !self.should_emit(severity) {
            return PendingMessage::disabled(severity);
        }
        // The sink may call back into this context, so no lock is held here.
        let tag = self.tag();
        PendingMessage::open(severity, self.sink.open_stream(severity), &tag)
    }
}

impl Default for LoggingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("level", &self.level())
            .field("tag", &self.tag())
            .field("bootstrapped", &self.bootstrap.is_completed())
            .finish_non_exhaustive()
    }
}

/// Builder for [`LoggingContext`].
///
/// Unset parts default to [`TracingSink`], [`BuildInfo`], the process
/// environment, [`Severity::All`] and an empty tag.
#[derive(Default)]
pub struct LoggingContextBuilder {
    sink: Option<Arc<dyn Sink>>,
    banner: Option<Arc<dyn BannerSource>>,
    env: Option<Box<EnvLookup>>,
    level: Severity,
    tag: String,
}

impl LoggingContextBuilder {
    /// Uses `sink` for admitted messages.
    pub fn sink(self, sink: impl Sink + 'static) -> Self {
        self.shared_sink(Arc::new(sink))
    }

    /// Uses a sink the caller keeps a handle to.
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Uses `banner` for the startup banner.
    ///
    /// A banner source that panics is treated like one that failed to write.
    pub fn banner(self, banner: impl BannerSource + 'static) -> Self {
        self.shared_banner(Arc::new(banner))
    }

    /// Uses a banner source the caller keeps a handle to.
    pub fn shared_banner(mut self, banner: Arc<dyn BannerSource>) -> Self {
        self.banner = Some(banner);
        self
    }

    /// Reads configuration variables through `lookup` instead of the process
    /// environment.
    ///
    /// A panicking lookup does not poison the context; see
    /// [`LoggingContext::bootstrap`].
    pub fn env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Some(Box::new(lookup));
        self
    }

    /// Initial level, used until the bootstrap or a setter changes it.
    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    /// Initial tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Creates the context.
    pub fn build(self) -> LoggingContext {
        LoggingContext {
            gate: LevelGate::new(self.level),
            tag: RwLock::new(self.tag),
            bootstrap: Once::new(),
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink) as Arc<dyn Sink>),
            banner: self
                .banner
                .unwrap_or_else(|| Arc::new(BuildInfo) as Arc<dyn BannerSource>),
            env: self.env.unwrap_or_else(|| Box::new(process_env) as Box<EnvLookup>),
        }
    }
}

impl fmt::Debug for LoggingContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContextBuilder")
            .field("level", &self.level)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}
