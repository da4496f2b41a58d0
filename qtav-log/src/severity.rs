// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Severity levels shared by the gate, the sinks and the configuration.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Ordered logging severity.
///
/// The same type is used both for the configured threshold and for the
/// severity of an individual call. A larger ordinal is more verbose: a
/// threshold of [`Severity::Warning`] admits warning, critical and fatal
/// messages but rejects debug ones. [`Severity::Off`] disables everything and
/// [`Severity::All`] admits everything.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    /// No output at all.
    Off = 0,
    /// Unrecoverable conditions. A fatal call always aborts the process.
    Fatal = 1,
    /// Errors the library can continue after.
    Critical = 2,
    /// Suspicious but handled situations.
    Warning = 3,
    /// Developer diagnostics.
    Debug = 4,
    /// Escape hatch that admits every severity. This is the default level.
    #[default]
    All = 5,
}

impl Severity {
    /// Every severity, in ascending order.
    pub const ALL_LEVELS: [Severity; 6] = [
        Severity::Off,
        Severity::Fatal,
        Severity::Critical,
        Severity::Warning,
        Severity::Debug,
        Severity::All,
    ];

    /// Returns the numeric ordinal of this severity.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Converts any integer into a severity, clamping into `[Off, All]`.
    pub fn from_clamped(value: i64) -> Severity {
        let clamped = value.clamp(Severity::Off as i64, Severity::All as i64);
        // In range after the clamp, so the lookup cannot miss.
        Severity::ALL_LEVELS[clamped as usize]
    }

    /// Lowercase name, as accepted by `QTAV_LOG_LEVEL`.
    pub const fn name(self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Fatal => "fatal",
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Debug => "debug",
            Severity::All => "all",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Severity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Severity::ALL_LEVELS
            .get(usize::from(value))
            .copied()
            .ok_or(Error::InvalidOrdinal(value))
    }
}

impl FromStr for Severity {
    type Err = Error;

    /// Parses a level the way `QTAV_LOG_LEVEL` is interpreted.
    ///
    /// An integer is clamped into range. Anything else is lowercased and
    /// matched by suffix against `off`, `debug`, `warning`, `critical`,
    /// `fatal`, `all` and `default` (an alias for `all`), in that order, so
    /// `"LogDebug"` and `"QtAV::Warning"` are both accepted.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(level) = trimmed.parse::<i64>() {
            return Ok(Severity::from_clamped(level));
        }

        let lower = trimmed.to_lowercase();
        const SUFFIXES: [(&str, Severity); 7] = [
            ("off", Severity::Off),
            ("debug", Severity::Debug),
            ("warning", Severity::Warning),
            ("critical", Severity::Critical),
            ("fatal", Severity::Fatal),
            ("all", Severity::All),
            ("default", Severity::All),
        ];
        SUFFIXES
            .iter()
            .find(|(suffix, _)| lower.ends_with(suffix))
            .map(|&(_, severity)| severity)
            .ok_or_else(|| Error::UnrecognizedLevel(s.to_string()))
    }
}
