// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Output destinations for admitted messages.
//!
//! A [`Sink`] receives messages that already passed the level gate. It is
//! handed either a fully formatted message ([`Sink::emit`]) or asked for a
//! [`SinkStream`] that accumulates fragments and writes them out once
//! ([`Sink::open_stream`]). Sinks never report failures to the caller.

use std::{
    fmt,
    io::Write,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{debug, error, warn};

use crate::Severity;

/// Target used for events produced by [`TracingSink`].
pub const TRACING_TARGET: &str = "qtav";

/// Destination for log messages.
pub trait Sink: Send + Sync {
    /// Writes one complete message.
    fn emit(&self, severity: Severity, message: &str);

    /// Opens a stream that collects fragments of a single message.
    ///
    /// The stream must write its content when [`SinkStream::finish`] is
    /// called, and not before.
    fn open_stream(&self, severity: Severity) -> Box<dyn SinkStream>;
}

/// An open message being assembled by a [`Sink`].
pub trait SinkStream: Send {
    /// Appends a fragment to the message.
    fn append(&mut self, fragment: &str);

    /// Writes the accumulated message.
    fn finish(self: Box<Self>);
}

/// [`SinkStream`] that buffers into a `String` and hands the result to a
/// closure on [`finish`](SinkStream::finish).
pub struct BufferedStream<F>
where
    F: FnOnce(&str) + Send,
{
    buffer: String,
    on_finish: F,
}

impl<F> BufferedStream<F>
where
    F: FnOnce(&str) + Send,
{
    /// Creates an empty stream that calls `on_finish` with the final text.
    pub fn new(on_finish: F) -> Self {
        Self {
            buffer: String::new(),
            on_finish,
        }
    }
}

impl<F> SinkStream for BufferedStream<F>
where
    F: FnOnce(&str) + Send,
{
    fn append(&mut self, fragment: &str) {
        self.buffer.push_str(fragment);
    }

    fn finish(self: Box<Self>) {
        let Self { buffer, on_finish } = *self;
        on_finish(&buffer);
    }
}

impl<F> fmt::Debug for BufferedStream<F>
where
    F: FnOnce(&str) + Send,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedStream")
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}

/// Sink that forwards every message as a `tracing` event.
///
/// Debug messages become `DEBUG` events, warnings `WARN`, and critical and
/// fatal messages `ERROR`. Fatal events additionally carry `fatal = true`.
/// All events use the [`TRACING_TARGET`] target, so an `EnvFilter` directive
/// such as `qtav=warn` controls them independently of the level gate.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    fn event(severity: Severity, message: &str) {
        match severity {
            Severity::Off => {}
            Severity::Fatal => error!(target: TRACING_TARGET, fatal = true, "{message}"),
            Severity::Critical => error!(target: TRACING_TARGET, "{message}"),
            Severity::Warning => warn!(target: TRACING_TARGET, "{message}"),
            Severity::Debug | Severity::All => debug!(target: TRACING_TARGET, "{message}"),
        }
    }
}

impl Sink for TracingSink {
    fn emit(&self, severity: Severity, message: &str) {
        Self::event(severity, message);
    }

    fn open_stream(&self, severity: Severity) -> Box<dyn SinkStream> {
        Box::new(BufferedStream::new(move |message: &str| {
            Self::event(severity, message)
        }))
    }
}

/// Sink writing one `"<severity>: <message>"` line per message to a writer.
///
/// Write errors are dropped.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Arc<Mutex<W>>,
}

impl<W> WriterSink<W>
where
    W: Write + Send + 'static,
{
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Returns a handle to the wrapped writer.
    pub fn writer(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.writer)
    }

    fn write_line(writer: &Mutex<W>, severity: Severity, message: &str) {
        let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{severity}: {message}").and_then(|()| writer.flush());
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send + 'static,
{
    fn emit(&self, severity: Severity, message: &str) {
        Self::write_line(&self.writer, severity, message);
    }

    fn open_stream(&self, severity: Severity) -> Box<dyn SinkStream> {
        let writer = Arc::clone(&self.writer);
        Box::new(BufferedStream::new(move |message: &str| {
            Self::write_line(&writer, severity, message)
        }))
    }
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl Sink for NoopSink {
    fn emit(&self, _severity: Severity, _message: &str) {}

    fn open_stream(&self, _severity: Severity) -> Box<dyn SinkStream> {
        Box::new(BufferedStream::new(|_: &str| {}))
    }
}
