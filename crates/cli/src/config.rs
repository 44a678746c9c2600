// SPDX-License-Identifier: MIT

//! Engine configuration (spec §9 Design Notes, SPEC_FULL §B.3): every
//! knob that would otherwise live in a module-level mutable singleton is
//! collected here and threaded explicitly into [`tmt_engine::Runtime`]
//! construction instead.

use std::time::Duration;
use tmt_core::duration::parse_duration;

const DEFAULT_REBOOT_TIMEOUT: &str = "10m";

/// How much of an internal error's detail to print (spec §7:
/// `TMT_SHOW_TRACEBACK={0,1,2}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TracebackLevel {
    /// Just the top-level message.
    Message,
    /// The message plus its `anyhow` cause chain.
    Chain,
    /// The cause chain plus a `RUST_BACKTRACE`-style capture.
    Full,
}

impl TracebackLevel {
    fn from_env_value(value: &str) -> Self {
        match value {
            "2" => TracebackLevel::Full,
            "1" => TracebackLevel::Chain,
            _ => TracebackLevel::Message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory new runs are created under, and `--last` is resolved
    /// against (spec §6: run identifier).
    pub workdir_root: std::path::PathBuf,
    pub reboot_timeout: Duration,
    pub traceback_level: TracebackLevel,
}

impl EngineConfig {
    /// Reads `TMT_WORKDIR_ROOT`, `TMT_REBOOT_TIMEOUT`, and
    /// `TMT_SHOW_TRACEBACK` from the environment, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let workdir_root = std::env::var_os("TMT_WORKDIR_ROOT")
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(".tmt"));

        let reboot_timeout = std::env::var("TMT_REBOOT_TIMEOUT")
            .ok()
            .and_then(|raw| parse_duration(&raw, false).ok())
            .unwrap_or_else(|| parse_duration(DEFAULT_REBOOT_TIMEOUT, false).unwrap_or(Duration::from_secs(600)));

        let traceback_level = std::env::var("TMT_SHOW_TRACEBACK")
            .map(|raw| TracebackLevel::from_env_value(&raw))
            .unwrap_or(TracebackLevel::Message);

        Self { workdir_root, reboot_timeout, traceback_level }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
