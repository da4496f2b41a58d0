// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for logging configuration.
//!
//! The logging entry points themselves never fail. Errors are only produced
//! by the configuration side of the API: parsing severities and installing a
//! process-wide context.

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while configuring the logger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A level string was neither an integer nor ended with a known level name.
    #[error("Unrecognized log level: {0:?}")]
    UnrecognizedLevel(String),

    /// A raw ordinal did not map to any [`crate::Severity`].
    #[error("Invalid severity ordinal: {0}")]
    InvalidOrdinal(u8),

    /// The process-wide context was already created, either by an earlier
    /// [`crate::install`] or by the first log call.
    #[error("Logging context already installed")]
    AlreadyInstalled,
}
