// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Fakes shared by the integration tests.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use qtav_log::{
    BannerSource, LoggingContext, Severity,
    sink::{BufferedStream, Sink, SinkStream},
};

#[derive(Default)]
struct Records {
    emitted: Mutex<Vec<(Severity, String)>>,
    opened: AtomicUsize,
    finished: Mutex<Vec<(Severity, String)>>,
}

/// Sink that records everything it is given.
#[derive(Clone, Default)]
pub struct RecordingSink {
    records: Arc<Records>,
}

impl RecordingSink {
    /// Messages passed to [`Sink::emit`].
    pub fn emitted(&self) -> Vec<(Severity, String)> {
        self.records.emitted.lock().unwrap().clone()
    }

    /// Number of streams opened so far.
    pub fn streams_opened(&self) -> usize {
        self.records.opened.load(Ordering::SeqCst)
    }

    /// Text of every stream that was finished.
    pub fn finished(&self) -> Vec<(Severity, String)> {
        self.records.finished.lock().unwrap().clone()
    }
}

impl Sink for RecordingSink {
    fn emit(&self, severity: Severity, message: &str) {
        self.records
            .emitted
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }

    fn open_stream(&self, severity: Severity) -> Box<dyn SinkStream> {
        self.records.opened.fetch_add(1, Ordering::SeqCst);
        let records = Arc::clone(&self.records);
        Box::new(BufferedStream::new(move |message: &str| {
            records
                .finished
                .lock()
                .unwrap()
                .push((severity, message.to_string()))
        }))
    }
}

/// Banner source that counts how often the banner was printed.
#[derive(Clone, Default)]
pub struct CountingBanner {
    prints: Arc<AtomicUsize>,
}

impl CountingBanner {
    pub fn prints(&self) -> usize {
        self.prints.load(Ordering::SeqCst)
    }
}

impl BannerSource for CountingBanner {
    fn version(&self) -> String {
        self.prints.fetch_add(1, Ordering::SeqCst);
        "qtav-log test build".to_string()
    }

    fn about(&self) -> String {
        "banner printed by the integration tests".to_string()
    }
}

/// Display impl that counts how often it was formatted.
pub struct FormatCounter<'a>(pub &'a AtomicUsize);

impl fmt::Display for FormatCounter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fetch_add(1, Ordering::SeqCst);
        f.write_str("counted")
    }
}

/// A context reading `env` instead of the process environment.
pub struct Fixture {
    pub context: LoggingContext,
    pub sink: RecordingSink,
    pub banner: CountingBanner,
}

pub fn fixture(env: &[(&str, &str)]) -> Fixture {
    fixture_with_level(env, Severity::All)
}

pub fn fixture_with_level(env: &[(&str, &str)], level: Severity) -> Fixture {
    let vars: HashMap<String, String> = env
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    let sink = RecordingSink::default();
    let banner = CountingBanner::default();
    let context = LoggingContext::builder()
        .sink(sink.clone())
        .banner(banner.clone())
        .env(move |name| vars.get(name).cloned())
        .level(level)
        .build();
    Fixture {
        context,
        sink,
        banner,
    }
}
