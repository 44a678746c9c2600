// SPDX-License-Identifier: MIT

//! The Multi-guest Dispatcher (spec §4.4): runs one phase across its
//! selected guest set, serially for a single guest or a `sequential`
//! phase, concurrently otherwise, always behind a barrier so the next
//! phase never starts until every guest has finished the current one.

use crate::error::RuntimeError;
use std::future::Future;
use std::pin::Pin;
use tokio::task::JoinSet;

pub type GuestJob = Pin<Box<dyn Future<Output = Result<(), RuntimeError>> + Send>>;

pub struct GuestOutcome {
    pub guest: String,
    pub result: Result<(), RuntimeError>,
}

/// Runs `jobs` — one per selected guest — honoring the phase-level
/// barrier: the call does not return until every job has finished or
/// been cancelled.
///
/// When `sequential` is false and there is more than one guest, jobs
/// run concurrently on the tokio runtime; if any of them fails, the
/// remaining in-flight jobs are aborted and the dispatcher still waits
/// for them to surrender before returning (spec §4.4: cooperative
/// cancellation).
pub async fn dispatch_phase(jobs: Vec<(String, GuestJob)>, sequential: bool) -> Vec<GuestOutcome> {
    if sequential || jobs.len() <= 1 {
        return run_serially(jobs).await;
    }

    let mut set = JoinSet::new();
    for (guest, job) in jobs {
        set.spawn(async move { (guest, job.await) });
    }

    let mut outcomes = Vec::new();
    let mut cancelling = false;
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((guest, result)) => {
                if result.is_err() && !cancelling {
                    cancelling = true;
                    set.abort_all();
                }
                outcomes.push(GuestOutcome { guest, result });
            }
            Err(join_err) if join_err.is_cancelled() => {
                outcomes.push(GuestOutcome {
                    guest: "<cancelled>".to_string(),
                    result: Err(RuntimeError::Cancelled),
                });
            }
            Err(join_err) => {
                outcomes.push(GuestOutcome {
                    guest: "<unknown>".to_string(),
                    result: Err(RuntimeError::Internal(join_err.to_string())),
                });
            }
        }
    }
    outcomes
}

async fn run_serially(jobs: Vec<(String, GuestJob)>) -> Vec<GuestOutcome> {
    let mut outcomes = Vec::new();
    let mut cancelled = false;
    for (guest, job) in jobs {
        if cancelled {
            outcomes.push(GuestOutcome { guest, result: Err(RuntimeError::Cancelled) });
            continue;
        }
        let result = job.await;
        if result.is_err() {
            cancelled = true;
        }
        outcomes.push(GuestOutcome { guest, result });
    }
    outcomes
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
