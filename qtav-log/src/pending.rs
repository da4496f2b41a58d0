// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Streaming log messages.

use std::fmt::{self, Display, Write as _};

use crate::{Severity, sink::SinkStream};

/// A streaming log message, written out when it is finished or dropped.
///
/// Returned by the `*_stream` entry points. When the level gate rejected the
/// call the message is *disabled*: it holds no sink stream, appends do
/// nothing, and values passed to [`append`](Self::append) are never
/// formatted.
///
/// Fragments are separated by a single space, starting after the tag.
/// Use [`nospace`](Self::nospace) to glue following fragments together.
///
/// ```
/// use qtav_log::{LoggingContext, NoopBanner, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// let out = sink.writer();
/// let context = LoggingContext::builder()
///     .sink(sink)
///     .banner(NoopBanner)
///     .env(|_| None)
///     .tag("[demux]")
///     .build();
///
/// context.warning_stream().append("packet").append(42).append("dropped");
///
/// let text = String::from_utf8(out.lock().unwrap().clone()).unwrap();
/// assert_eq!(text, "warning: [demux] packet 42 dropped\n");
/// ```
pub struct PendingMessage {
    severity: Severity,
    stream: Option<Box<dyn SinkStream>>,
    space: bool,
    empty: bool,
}

impl PendingMessage {
    /// A message that was rejected by the gate.
    pub(crate) fn disabled(severity: Severity) -> Self {
        Self {
            severity,
            stream: None,
            space: true,
            empty: true,
        }
    }

    /// A message backed by an open stream, seeded with `tag` when non-empty.
    pub(crate) fn open(severity: Severity, stream: Box<dyn SinkStream>, tag: &str) -> Self {
        let mut message = Self {
            severity,
            stream: Some(stream),
            space: true,
            empty: true,
        };
        if !tag.is_empty() {
            message = message.append(tag);
        }
        message
    }

    /// Severity the message was requested at.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns `true` if the message will be written.
    pub fn is_enabled(&self) -> bool {
        self.stream.is_some()
    }

    /// Appends a value using its [`Display`] implementation.
    pub fn append<T: Display>(mut self, value: T) -> Self {
        if let Some(stream) = self.stream.as_deref_mut() {
            if self.space && !self.empty {
                stream.append(" ");
            }
            let _ = write!(StreamWriter(stream), "{value}");
            self.empty = false;
        }
        self
    }

    /// Appends a value using its [`fmt::Debug`] implementation.
    pub fn append_debug<T: fmt::Debug>(self, value: T) -> Self {
        self.append(DebugAsDisplay(value))
    }

    /// Stops inserting spaces between the following fragments.
    pub fn nospace(mut self) -> Self {
        self.space = false;
        self
    }

    /// Resumes inserting spaces between the following fragments.
    pub fn space(mut self) -> Self {
        self.space = true;
        self
    }

    /// Writes the message now instead of at the end of the scope.
    pub fn finish(mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.finish();
        }
    }
}

impl Drop for PendingMessage {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Raw text written through `write!` is appended without any separator.
impl fmt::Write for PendingMessage {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Some(stream) = self.stream.as_deref_mut() {
            stream.append(s);
            self.empty = self.empty && s.is_empty();
        }
        Ok(())
    }
}

impl fmt::Debug for PendingMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingMessage")
            .field("severity", &self.severity)
            .field("enabled", &self.is_enabled())
            .field("space", &self.space)
            .finish()
    }
}

struct StreamWriter<'a>(&'a mut (dyn SinkStream + 'static));

impl fmt::Write for StreamWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.append(s);
        Ok(())
    }
}

struct DebugAsDisplay<T>(T);

impl<T: fmt::Debug> Display for DebugAsDisplay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
