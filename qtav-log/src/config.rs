// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Environment-driven logger configuration.
//!
//! The configuration is read once, on the first log call of a
//! [`LoggingContext`], and then applied on top of whatever the program set
//! through [`LoggingContext::set_level`] and [`LoggingContext::set_tag`].

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{LoggingContext, Severity};

/// Environment variable holding the initial log level.
pub const LEVEL_ENV: &str = "QTAV_LOG_LEVEL";

/// Environment variable holding the message prefix.
pub const TAG_ENV: &str = "QTAV_LOG_TAG";

/// Lookup function used to read configuration variables.
///
/// Returns `None` when the variable is not set.
pub type EnvLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Level and tag overrides read from the environment.
///
/// A `None` field means "leave the current value alone".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level override, if the level variable held a recognized value.
    pub level: Option<Severity>,
    /// Tag override, if the tag variable was set and non-empty.
    pub tag: Option<String>,
}

impl LogConfig {
    /// Reads `QTAV_LOG_LEVEL` and `QTAV_LOG_TAG` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    /// Reads the configuration through an arbitrary lookup function.
    ///
    /// Empty values are treated as unset. A level value that is neither an
    /// integer nor ends with a known level name is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use qtav_log::{LogConfig, Severity};
    ///
    /// let config = LogConfig::from_lookup(|name| match name {
    ///     "QTAV_LOG_LEVEL" => Some("LogWarning".to_string()),
    ///     "QTAV_LOG_TAG" => Some("[player] ".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.level, Some(Severity::Warning));
    /// assert_eq!(config.tag.as_deref(), Some("[player] "));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup(LEVEL_ENV)
            .filter(|value| !value.is_empty())
            .and_then(|value| match value.parse::<Severity>() {
                Ok(level) => Some(level),
                Err(error) => {
                    trace!(target: "qtav_log::config", %error, "ignoring {LEVEL_ENV}");
                    None
                }
            });
        let tag = lookup(TAG_ENV).filter(|value| !value.is_empty());
        Self { level, tag }
    }

    /// Applies the overrides to a context, leaving unset fields untouched.
    pub fn apply_to(&self, context: &LoggingContext) {
        if let Some(level) = self.level {
            context.set_level(level);
        }
        if let Some(tag) = &self.tag {
            context.set_tag(tag.clone());
        }
    }
}

/// [`EnvLookup`] backed by [`std::env::var_os`].
///
/// Values that are not valid UTF-8 are kept, with the invalid bytes replaced
/// by U+FFFD.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
}
