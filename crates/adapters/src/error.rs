// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuestError {
    #[error(transparent)]
    Shell(#[from] tmt_shell::ExecError),
    #[error("guest communication failed: {0}")]
    Communication(String),
    #[error("guest does not support this operation: {0}")]
    Unsupported(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
