// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tmt-shell: local process execution.
//!
//! This crate runs one command to completion and captures its output. It
//! does not parse or validate shell scripts — a test's `test:` script or
//! a phase's `script:` is an opaque string handed to `/bin/sh -c`, the
//! way the framework-under-test's own shell already treats it. The only
//! behavior this crate owns is spawning, env/cwd setup, output capture,
//! and the wall-clock timeout's SIGTERM→SIGKILL escalation.

pub mod exec;

pub use exec::{execute, CommandOutput, ExecError, ExecOptions};
