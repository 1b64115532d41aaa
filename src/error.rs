// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Crate-wide error type.
//!
//! The sensor links carry no acknowledgment, parity or framing signal, so nothing here describes a
//! line fault. Errors only come from the pin HAL or from calling an operation in the wrong power
//! state.

use core::fmt;

/// Result type for sensor operations.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO operation on one of the sensor lines failed.
    Pin,
    /// A sampling operation was issued while the sensor was not `Active`.
    NotActive,
    /// `hard_reset()` was requested but no reset line is wired.
    NoResetLine,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin => write!(f, "sensor line error"),
            Error::NotActive => write!(f, "sensor is not active"),
            Error::NoResetLine => write!(f, "no reset line configured"),
        }
    }
}
