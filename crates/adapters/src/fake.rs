// SPDX-License-Identifier: MIT

//! A scripted [`GuestAdapter`] for engine tests: every `run` pops the
//! next pre-recorded [`CommandOutput`] instead of touching a real guest
//! (spec §8's scenarios are driven against this).

use crate::error::GuestError;
use crate::guest::GuestAdapter;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tmt_core::guest::GuestCapabilities;
use tmt_shell::{CommandOutput, ExecOptions};

#[derive(Debug, Default)]
pub struct FakeGuestAdapter {
    scripted: Mutex<VecDeque<CommandOutput>>,
    calls: Mutex<Vec<String>>,
    capabilities: GuestCapabilities,
}

impl FakeGuestAdapter {
    pub fn new(capabilities: GuestCapabilities) -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            capabilities,
        }
    }

    pub fn push_output(&self, output: CommandOutput) {
        self.scripted.lock().push_back(output);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

fn default_pass() -> CommandOutput {
    CommandOutput {
        exit_code: Some(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
        timed_out: false,
    }
}

#[async_trait]
impl GuestAdapter for FakeGuestAdapter {
    async fn run(&self, guest: &str, command: &str, _options: &ExecOptions) -> Result<CommandOutput, GuestError> {
        self.calls.lock().push(format!("{guest}: {command}"));
        Ok(self.scripted.lock().pop_front().unwrap_or_else(default_pass))
    }

    async fn reboot(&self, guest: &str, _options: &ExecOptions) -> Result<(), GuestError> {
        if !self.capabilities.can_reboot {
            return Err(GuestError::Unsupported("fake guest configured without reboot support"));
        }
        self.calls.lock().push(format!("{guest}: <reboot>"));
        Ok(())
    }

    fn capabilities(&self, _guest: &str) -> GuestCapabilities {
        self.capabilities
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
