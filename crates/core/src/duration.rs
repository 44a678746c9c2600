// SPDX-License-Identifier: MIT

//! Test-duration parsing: `Nd Nh Nm Ns` components and a `k * <duration>`
//! multiplication prefix (spec §4.5.3), used for the invoker's wall-clock
//! timeout and for `TMT_REBOOT_TIMEOUT`-style defaults.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,
    #[error("invalid duration component: {0:?}")]
    InvalidComponent(String),
    #[error("invalid multiplier: {0:?}")]
    InvalidMultiplier(String),
    #[error("duration `0` is not a timeout; pass --ignore-duration to mean \"no timeout\"")]
    ZeroWithoutIgnore,
}

/// Parse a duration string like `5m`, `1h30m`, `2 * 1h`, or a bare integer
/// (seconds). `ignore_duration` mirrors the `--ignore-duration` CLI flag:
/// when false, a literal `0` is rejected per spec §8 boundary behavior.
pub fn parse_duration(input: &str, ignore_duration: bool) -> Result<Duration, DurationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DurationError::Empty);
    }

    let (multiplier, rest) = match input.split_once('*') {
        Some((lhs, rhs)) => {
            let lhs = lhs.trim();
            let count: u32 = lhs
                .parse()
                .map_err(|_| DurationError::InvalidMultiplier(lhs.to_string()))?;
            (count, rhs.trim())
        }
        None => (1, input),
    };

    let base = parse_components(rest)?;
    let total = base
        .checked_mul(multiplier)
        .ok_or_else(|| DurationError::InvalidMultiplier(input.to_string()))?;

    if total == Duration::ZERO && !ignore_duration {
        return Err(DurationError::ZeroWithoutIgnore);
    }

    Ok(total)
}

/// Parse the `Nd Nh Nm Ns` component grammar (and a bare integer, read as
/// seconds) without the multiplication prefix.
fn parse_components(input: &str) -> Result<Duration, DurationError> {
    if let Ok(seconds) = input.parse::<u64>() {
        return Ok(Duration::from_secs(seconds));
    }

    let mut total = Duration::ZERO;
    let mut digits = String::new();
    let mut saw_any = false;

    for ch in input.chars() {
        if ch.is_whitespace() {
            continue;
        }
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let unit_seconds: u64 = match ch {
            'd' => 86_400,
            'h' => 3_600,
            'm' => 60,
            's' => 1,
            _ => return Err(DurationError::InvalidComponent(input.to_string())),
        };
        if digits.is_empty() {
            return Err(DurationError::InvalidComponent(input.to_string()));
        }
        let n: u64 = digits
            .parse()
            .map_err(|_| DurationError::InvalidComponent(input.to_string()))?;
        total += Duration::from_secs(n * unit_seconds);
        digits.clear();
        saw_any = true;
    }

    if !digits.is_empty() || !saw_any {
        return Err(DurationError::InvalidComponent(input.to_string()));
    }

    Ok(total)
}

/// Render a duration in the engine's own log/summary style (`1h30m`, `45s`).
pub fn format_duration(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    if secs == 0 {
        return "0s".to_string();
    }
    let mut out = String::new();
    for (unit, unit_secs) in [("d", 86_400), ("h", 3_600), ("m", 60), ("s", 1)] {
        let count = secs / unit_secs;
        if count > 0 {
            out.push_str(&count.to_string());
            out.push_str(unit);
            secs -= count * unit_secs;
        }
    }
    out
}

/// `serde(with = "...")` helper for storing a [`Duration`] as whole
/// seconds, used by artifacts that embed a duration field (spec §4.2
/// YAML artifacts use plain integers for durations, not nested objects).
pub mod serde_secs {
    use super::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
