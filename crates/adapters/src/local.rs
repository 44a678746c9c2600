// SPDX-License-Identifier: MIT

//! The reference `local` guest: runs directly on the host tmt itself is
//! invoked on. Used by the smoke-test scenario and as the default guest
//! when a plan has no `provision` section at all.

use crate::error::GuestError;
use crate::guest::GuestAdapter;
use async_trait::async_trait;
use tmt_core::guest::GuestCapabilities;
use tmt_shell::{CommandOutput, ExecOptions};

#[derive(Debug, Clone, Default)]
pub struct LocalGuestAdapter;

#[async_trait]
impl GuestAdapter for LocalGuestAdapter {
    async fn run(&self, _guest: &str, command: &str, options: &ExecOptions) -> Result<CommandOutput, GuestError> {
        tmt_shell::execute(command, options).await.map_err(GuestError::from)
    }

    async fn reboot(&self, _guest: &str, _options: &ExecOptions) -> Result<(), GuestError> {
        Err(GuestError::Unsupported("local guest cannot reboot the host it runs on"))
    }

    fn capabilities(&self, _guest: &str) -> GuestCapabilities {
        GuestCapabilities {
            can_reboot: false,
            can_push_workdir: true,
        }
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
