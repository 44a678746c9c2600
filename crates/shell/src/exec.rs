// SPDX-License-Identifier: MIT

//! Spawn, capture, and (on timeout) escalate a single command.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn command: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed to read command output: {0}")]
    Io(#[source] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub cwd: Option<PathBuf>,
    pub env: HashMap<String, String>,
    /// Wall-clock budget for the whole command. `None` means no timeout.
    pub timeout: Option<Duration>,
    /// Grace period between SIGTERM and SIGKILL once `timeout` elapses.
    pub kill_grace: Duration,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            env: HashMap::new(),
            timeout: None,
            kill_grace: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub timed_out: bool,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Runs `command` under `/bin/sh -c`, capturing stdout/stderr.
///
/// If `options.timeout` elapses first, the process group leader is sent
/// `SIGTERM`; if it hasn't exited after `options.kill_grace`, it is sent
/// `SIGKILL`. Either way `timed_out` is set on the returned output rather
/// than this function returning an error — a timeout is a normal, testable
/// outcome, not an execution failure.
pub async fn execute(command: &str, options: &ExecOptions) -> Result<CommandOutput, ExecError> {
    let mut builder = Command::new("/bin/sh");
    builder.arg("-c").arg(command);
    if let Some(cwd) = &options.cwd {
        builder.current_dir(cwd);
    }
    builder.envs(&options.env);
    builder.stdin(Stdio::null());
    builder.stdout(Stdio::piped());
    builder.stderr(Stdio::piped());

    let mut child = builder.spawn().map_err(ExecError::Spawn)?;
    let pid = child.id();
    let mut stdout_pipe = child.stdout.take().expect("stdout was piped");
    let mut stderr_pipe = child.stderr.take().expect("stderr was piped");

    let collect = async {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let (stdout_result, stderr_result) = tokio::join!(
            stdout_pipe.read_to_end(&mut stdout),
            stderr_pipe.read_to_end(&mut stderr),
        );
        stdout_result.map_err(ExecError::Io)?;
        stderr_result.map_err(ExecError::Io)?;
        let status = child.wait().await.map_err(ExecError::Io)?;
        Ok::<_, ExecError>((status.code(), stdout, stderr))
    };

    let Some(timeout) = options.timeout else {
        let (exit_code, stdout, stderr) = collect.await?;
        return Ok(CommandOutput { exit_code, stdout, stderr, timed_out: false });
    };

    match tokio::time::timeout(timeout, collect).await {
        Ok(result) => {
            let (exit_code, stdout, stderr) = result?;
            Ok(CommandOutput { exit_code, stdout, stderr, timed_out: false })
        }
        Err(_) => {
            if let Some(pid) = pid {
                terminate_then_kill(pid, options.kill_grace).await;
            }
            Ok(CommandOutput {
                exit_code: None,
                stdout: Vec::new(),
                stderr: Vec::new(),
                timed_out: true,
            })
        }
    }
}

/// Escalates a still-running child from `SIGTERM` to `SIGKILL` after
/// `grace`. Called once a timeout has fired; swallows errors from a
/// process that has already exited on its own.
async fn terminate_then_kill(pid: u32, grace: Duration) {
    // SAFETY: `pid` names a process we spawned and still hold a handle
    // to; sending it a signal cannot affect unrelated processes.
    unsafe {
        libc::kill(pid as libc::pid_t, libc::SIGTERM);
    }
    tokio::time::sleep(grace).await;
    unsafe {
        libc::kill(pid as libc::pid_t, libc::SIGKILL);
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
