// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Severity admission check.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::Severity;

/// Holds the current threshold and decides whether a call is emitted.
///
/// The threshold is a single atomic byte, so concurrent readers always see
/// either the old or the new level and never a torn value.
#[derive(Debug)]
pub struct LevelGate {
    level: AtomicU8,
}

impl LevelGate {
    /// Creates a gate with the given initial threshold.
    pub const fn new(level: Severity) -> Self {
        Self {
            level: AtomicU8::new(level.ordinal()),
        }
    }

    /// Returns the current threshold.
    pub fn level(&self) -> Severity {
        Severity::from_clamped(i64::from(self.level.load(Ordering::Acquire)))
    }

    /// Replaces the current threshold.
    pub fn set_level(&self, level: Severity) {
        self.level.store(level.ordinal(), Ordering::Release);
    }

    /// Returns `true` if a call at `requested` passes the current threshold.
    pub fn should_emit(&self, requested: Severity) -> bool {
        Self::admits(self.level(), requested)
    }

    /// The admission rule on its own.
    ///
    /// Both conditions must hold: the threshold is above [`Severity::Off`],
    /// and it is either at least as verbose as `requested` or is
    /// [`Severity::All`].
    pub fn admits(current: Severity, requested: Severity) -> bool {
        current > Severity::Off && (current >= requested || current >= Severity::All)
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new(Severity::default())
    }
}
