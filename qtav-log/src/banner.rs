// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Startup banner printed before the first enabled message.

use std::io::{self, Write};

// Build script generates constants.rs with QTAV_LOG_BUILD_TARGET and QTAV_LOG_BUILD_VARIANT
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

const ABOUT_TEXT: &str = "\
QtAV logging: severity-gated diagnostics for the media playback library.
Set QTAV_LOG_LEVEL=off|fatal|critical|warning|debug|all (or 0-5) to change verbosity
and QTAV_LOG_TAG to prefix every message.";

/// Provides the text of the one-time startup banner.
pub trait BannerSource: Send + Sync {
    /// One line identifying the library build.
    fn version(&self) -> String;

    /// Free-form description printed after the version line.
    fn about(&self) -> String;

    /// Writes the banner and flushes `out`.
    fn write_banner(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.version())?;
        writeln!(out, "{}", self.about())?;
        out.flush()
    }
}

/// Banner describing this build of the crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildInfo;

impl BannerSource for BuildInfo {
    fn version(&self) -> String {
        format!(
            "{} {} ({}, {})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            QTAV_LOG_BUILD_TARGET,
            QTAV_LOG_BUILD_VARIANT
        )
    }

    fn about(&self) -> String {
        ABOUT_TEXT.to_string()
    }
}

/// Banner that prints nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopBanner;

impl BannerSource for NoopBanner {
    fn version(&self) -> String {
        String::new()
    }

    fn about(&self) -> String {
        String::new()
    }

    fn write_banner(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}
