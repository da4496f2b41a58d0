// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! First-call environment bootstrap and level parsing.

mod common;

use std::{sync::Barrier, thread};

use qtav_log::{BannerSource, Error, LogConfig, LoggingContext, Severity};

use common::{RecordingSink, fixture, fixture_with_level};

struct PanickingBanner;

impl BannerSource for PanickingBanner {
    fn version(&self) -> String {
        panic!("version lookup failed")
    }

    fn about(&self) -> String {
        String::new()
    }
}

#[test]
fn integer_level_selects_ordinal() {
    let fixture = fixture(&[("QTAV_LOG_LEVEL", "2")]);
    fixture.context.bootstrap();
    assert_eq!(fixture.context.level(), Severity::Critical);
}

#[test]
fn integer_level_is_clamped() {
    let low = fixture(&[("QTAV_LOG_LEVEL", "-7")]);
    low.context.bootstrap();
    assert_eq!(low.context.level(), Severity::Off);

    let high = fixture(&[("QTAV_LOG_LEVEL", "99")]);
    high.context.bootstrap();
    assert_eq!(high.context.level(), Severity::All);
}

#[test]
fn named_level_is_case_insensitive() {
    for value in ["debug", "DEBUG", "Debug", "LogDebug", "QtAV::DeBuG"] {
        let fixture = fixture_with_level(&[("QTAV_LOG_LEVEL", value)], Severity::Off);
        fixture.context.bootstrap();
        assert_eq!(fixture.context.level(), Severity::Debug, "value {value:?}");
    }
}

#[test]
fn default_is_an_alias_for_all() {
    let fixture = fixture_with_level(&[("QTAV_LOG_LEVEL", "LogDefault")], Severity::Warning);
    fixture.context.bootstrap();
    assert_eq!(fixture.context.level(), Severity::All);
}

#[test]
fn unrecognized_level_keeps_previous_value() {
    let fixture = fixture_with_level(&[("QTAV_LOG_LEVEL", "bogus")], Severity::Warning);
    fixture.context.bootstrap();
    assert_eq!(fixture.context.level(), Severity::Warning);
}

#[test]
fn environment_overrides_level_set_before_first_call() {
    let fixture = fixture(&[("QTAV_LOG_LEVEL", "critical")]);
    fixture.context.set_level(Severity::Debug);
    assert_eq!(fixture.context.level(), Severity::Debug);

    fixture.context.warning(format_args!("suppressed"));

    assert_eq!(fixture.context.level(), Severity::Critical);
    assert!(fixture.sink.emitted().is_empty());
}

#[test]
fn setter_wins_after_bootstrap() {
    let fixture = fixture(&[("QTAV_LOG_LEVEL", "off")]);
    fixture.context.debug(format_args!("dropped"));
    fixture.context.set_level(Severity::Debug);
    fixture.context.debug(format_args!("kept"));

    assert_eq!(
        fixture.sink.emitted(),
        vec![(Severity::Debug, "kept".to_string())]
    );
}

#[test]
fn tag_is_prepended_without_separator() {
    let fixture = fixture(&[("QTAV_LOG_TAG", "[X]")]);
    fixture.context.debug(format_args!("hi"));
    assert_eq!(
        fixture.sink.emitted(),
        vec![(Severity::Debug, "[X]hi".to_string())]
    );
    assert_eq!(fixture.context.tag(), "[X]");
}

#[test]
fn empty_tag_variable_is_ignored() {
    let fixture = fixture(&[("QTAV_LOG_TAG", "")]);
    fixture.context.set_tag("[keep]");
    fixture.context.debug(format_args!("hi"));
    assert_eq!(fixture.context.tag(), "[keep]");
}

#[test]
fn bootstrap_is_lazy() {
    let fixture = fixture(&[("QTAV_LOG_LEVEL", "fatal"), ("QTAV_LOG_TAG", "t")]);
    assert_eq!(fixture.context.level(), Severity::All);
    assert_eq!(fixture.context.tag(), "");
    assert_eq!(fixture.banner.prints(), 0);

    drop(fixture.context.debug_stream());

    assert_eq!(fixture.context.level(), Severity::Fatal);
    assert_eq!(fixture.context.tag(), "t");
}

#[test]
fn banner_is_printed_once_when_enabled() {
    let fixture = fixture(&[]);
    fixture.context.debug(format_args!("one"));
    fixture.context.warning(format_args!("two"));
    drop(fixture.context.critical_stream());
    assert_eq!(fixture.banner.prints(), 1);
}

#[test]
fn banner_is_skipped_when_level_is_off() {
    let fixture = fixture(&[("QTAV_LOG_LEVEL", "off")]);
    fixture.context.critical(format_args!("quiet"));
    assert_eq!(fixture.banner.prints(), 0);
}

#[test]
fn concurrent_first_calls_bootstrap_once() {
    const THREADS: usize = 16;
    let fixture = fixture(&[("QTAV_LOG_LEVEL", "debug")]);
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for index in 0..THREADS {
            let context = &fixture.context;
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                context.debug(format_args!("thread {index}"));
            });
        }
    });

    assert_eq!(fixture.banner.prints(), 1);
    assert_eq!(fixture.sink.emitted().len(), THREADS);
}

#[test]
fn panicking_environment_lookup_does_not_break_logging() {
    let sink = RecordingSink::default();
    let context = LoggingContext::builder()
        .sink(sink.clone())
        .banner(qtav_log::NoopBanner)
        .env(|_| panic!("environment unavailable"))
        .level(Severity::Warning)
        .tag("[t]")
        .build();

    context.debug(format_args!("hidden"));
    context.warning(format_args!("first"));
    context.critical_stream().append("second");

    assert_eq!(context.level(), Severity::Warning);
    assert_eq!(
        sink.emitted(),
        vec![(Severity::Warning, "[t]first".to_string())]
    );
    assert_eq!(
        sink.finished(),
        vec![(Severity::Critical, "[t] second".to_string())]
    );
}

#[test]
fn panicking_banner_does_not_break_logging() {
    let sink = RecordingSink::default();
    let context = LoggingContext::builder()
        .sink(sink.clone())
        .banner(PanickingBanner)
        .env(|name| (name == "QTAV_LOG_LEVEL").then(|| "critical".to_string()))
        .build();

    context.critical(format_args!("one"));
    context.critical(format_args!("two"));

    assert_eq!(context.level(), Severity::Critical);
    assert_eq!(sink.emitted().len(), 2);
}

#[test]
fn severity_parsing_reports_unrecognized_values() {
    assert_eq!("LogWarning".parse::<Severity>(), Ok(Severity::Warning));
    assert_eq!(" 3 ".parse::<Severity>(), Ok(Severity::Warning));
    assert_eq!(
        "loud".parse::<Severity>(),
        Err(Error::UnrecognizedLevel("loud".to_string()))
    );
    assert_eq!(Severity::try_from(4u8), Ok(Severity::Debug));
    assert_eq!(Severity::try_from(6u8), Err(Error::InvalidOrdinal(6)));
}

#[test]
fn config_from_lookup_and_snapshot() {
    let config = LogConfig::from_lookup(|name| match name {
        "QTAV_LOG_LEVEL" => Some("nonsense".to_string()),
        "QTAV_LOG_TAG" => Some("[tag] ".to_string()),
        _ => None,
    });
    assert_eq!(config.level, None);
    assert_eq!(config.tag.as_deref(), Some("[tag] "));

    let fixture = fixture(&[("QTAV_LOG_LEVEL", "warning"), ("QTAV_LOG_TAG", "[p]")]);
    fixture.context.bootstrap();
    let snapshot = fixture.context.config();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json, serde_json::json!({ "level": "warning", "tag": "[p]" }));

    let parsed: LogConfig = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, snapshot);
}
