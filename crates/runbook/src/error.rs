// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("plan has no provision section and no default guest")]
    NoGuests,
    #[error("phase {0:?} targets unknown guest role {1:?} via `where`")]
    UnknownWhereTarget(String, String),
    #[error("phase {0:?} has an invalid `when` rule: {1}")]
    InvalidWhen(String, String),
    #[error("duplicate phase id {0:?} within step {1:?}")]
    DuplicatePhaseId(String, String),
    #[error("adjust rule has an invalid `when` condition: {0}")]
    InvalidAdjustWhen(String),
    #[error("test {0:?} has an invalid duration {1:?}: {2}")]
    InvalidTestDuration(String, String, String),
    #[error("test {0:?} targets unknown guest role {1:?} via `where`")]
    UnknownTestTarget(String, String),
}
