// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Duration-string parsing (`[0-9]+(ns|us|ms|s|m|h)`).

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("empty duration string")]
    Empty,
    #[error("invalid duration {0:?}: no numeric magnitude")]
    NoMagnitude(String),
    #[error("invalid duration {0:?}: unrecognised unit {1:?}")]
    UnknownUnit(String, String),
    #[error("invalid duration {0:?}: magnitude does not fit in u64")]
    MagnitudeOverflow(String),
}

/// Parses strings of the form `<digits><unit>` where unit is one of
/// `ns`, `us`, `ms`, `s`, `m`, `h`.
pub fn parse_duration(s: &str) -> Result<Duration, DurationParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let split_at = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split_at);
    if digits.is_empty() {
        return Err(DurationParseError::NoMagnitude(s.to_string()));
    }

    let magnitude: u64 = digits
        .parse()
        .map_err(|_| DurationParseError::MagnitudeOverflow(s.to_string()))?;

    match unit {
        "ns" => Ok(Duration::from_nanos(magnitude)),
        "us" => Ok(Duration::from_micros(magnitude)),
        "ms" => Ok(Duration::from_millis(magnitude)),
        "s" => Ok(Duration::from_secs(magnitude)),
        "m" => Ok(Duration::from_secs(magnitude.saturating_mul(60))),
        "h" => Ok(Duration::from_secs(magnitude.saturating_mul(3600))),
        other => Err(DurationParseError::UnknownUnit(s.to_string(), other.to_string())),
    }
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
