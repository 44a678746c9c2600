// SPDX-License-Identifier: MIT

//! The Test Invoker (spec §4.5): runs one test invocation on one guest
//! through its environment layering, reboot loop, restart loop, and
//! subresult harvest, producing one or more [`TestResult`]s.
//!
//! The guest-side `tmt-reboot` helper (spec §6) is a flock-protected
//! pidfile protocol belonging to a concrete SSH/provisioner guest, which
//! is out of scope here. This invoker talks to that protocol through two
//! reserved exit codes a [`GuestAdapter`] implementation is expected to
//! surface in its place: [`REBOOT_MARKER_EXIT_CODE`] and
//! [`ABORT_MARKER_EXIT_CODE`].

use crate::env::{build_test_env, TestEnvContext};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use tmt_adapters::{GuestAdapter, GuestError};
use tmt_core::clock::{Clock, SystemClock};
use tmt_core::context::Context;
use tmt_core::guest::GuestRole;
use tmt_core::invocation::{ResultPolicy, SerialNumber, TestInvocation};
use tmt_core::outcome::Outcome;
use tmt_core::result::{Subresult, TestResult};
use tmt_shell::ExecOptions;
use tmt_storage::Workdir;

/// Exit code an invoker treats as "the test requested a reboot", standing
/// in for the real `tmt-reboot` pidfile protocol.
pub const REBOOT_MARKER_EXIT_CODE: i32 = 199;
/// Exit code an invoker treats as "the test called `tmt-abort`".
pub const ABORT_MARKER_EXIT_CODE: i32 = 190;

/// Safeguard against a test that reboots on every invocation.
const MAX_REBOOT_ATTEMPTS: u32 = 10;

pub struct InvokeContext<'a> {
    pub workdir: &'a Workdir,
    pub plan_slug: &'a str,
    pub plan_environment: &'a std::collections::HashMap<String, String>,
    pub plan_context: &'a Context,
    pub run_id: &'a str,
    pub guest_role: GuestRole,
    pub reboot_timeout: Duration,
    pub report_artifacts_url: Option<&'a str>,
    pub debug: bool,
    /// Mints serial numbers for the extra independent Results a
    /// `result: restraint` test produces beyond its own (spec §4.5.7),
    /// seeded above every serial number materialize already assigned so
    /// it never collides with another discovered test.
    pub extra_serial: &'a AtomicU32,
}

/// Outcome of [`invoke`] beyond the [`TestResult`]s themselves, so the
/// caller can emit the matching engine events without this module
/// depending on `tmt_core::Event` directly. Normally one Result; more
/// than one only under `result: restraint` (spec §4.5.7).
pub struct InvokeOutcome {
    pub results: Vec<TestResult>,
    pub rebooted: bool,
    pub aborted: bool,
}

pub async fn invoke(
    guest_adapter: &dyn GuestAdapter,
    test: &TestInvocation,
    ctx: &InvokeContext<'_>,
) -> InvokeOutcome {
    let start = Instant::now();
    let start_epoch_ms = SystemClock.epoch_ms();
    let mut reboot_count = 0u32;
    let mut restart_count = 0u32;
    let mut rebooted = false;
    let mut log: Vec<String> = Vec::new();

    loop {
        let env = build_test_env(&TestEnvContext {
            plan_environment: ctx.plan_environment,
            test_environment: &test.environment,
            workdir: ctx.workdir,
            plan_slug: ctx.plan_slug,
            test_id: &test.name,
            run_id: ctx.run_id,
            serial: test.serial_number,
            reboot_count,
            restart_count,
            report_artifacts_url: ctx.report_artifacts_url,
            debug: ctx.debug,
        });

        let options = ExecOptions {
            cwd: None,
            env,
            timeout: Some(test.duration),
            ..ExecOptions::default()
        };

        let output = match guest_adapter.run(&test.guest, &test.command, &options).await {
            Ok(output) => output,
            Err(err) => {
                return InvokeOutcome {
                    results: vec![error_result(test, ctx, start, start_epoch_ms, format!("guest communication error: {err}"))],
                    rebooted,
                    aborted: false,
                };
            }
        };

        if output.timed_out {
            return InvokeOutcome {
                results: vec![error_result(test, ctx, start, start_epoch_ms, format!("test timed out after {:?}", test.duration))],
                rebooted,
                aborted: false,
            };
        }

        let exit_code = output.exit_code.unwrap_or(-1);

        if exit_code == ABORT_MARKER_EXIT_CODE {
            let result = error_result(test, ctx, start, start_epoch_ms, "aborted");
            return InvokeOutcome { results: vec![result], rebooted, aborted: true };
        }

        if exit_code == REBOOT_MARKER_EXIT_CODE && reboot_count < MAX_REBOOT_ATTEMPTS {
            match reboot_guest(guest_adapter, test, ctx).await {
                Ok(()) => {
                    reboot_count += 1;
                    rebooted = true;
                    log.push(format!("rebooted guest {} (attempt {reboot_count})", test.guest));
                    continue;
                }
                Err(err) => {
                    return InvokeOutcome {
                        results: vec![error_result(test, ctx, start, start_epoch_ms, err)],
                        rebooted,
                        aborted: false,
                    };
                }
            }
        }

        if test.restart_policy.allows_restart(exit_code, restart_count) {
            restart_count += 1;
            continue;
        }

        let raw = Outcome::from_exit_code(exit_code);
        let interpreted = test.result_policy.interpret(raw);
        let subresults = parse_subresults(&output.stdout);

        let mut results = if test.result_policy == ResultPolicy::Restraint && !subresults.is_empty() {
            build_restraint_results(test, ctx, start, start_epoch_ms, &subresults)
        } else {
            vec![build_result(test, ctx, start, start_epoch_ms, raw, interpreted, subresults)]
        };

        for result in &mut results {
            result.log = log.clone();
            if restart_count > 0 && result.outcome.is_failure() {
                result.note.push(format!("restart limit reached after {restart_count} restart(s)"));
            }
        }

        return InvokeOutcome { results, rebooted, aborted: false };
    }
}

async fn reboot_guest(
    guest_adapter: &dyn GuestAdapter,
    test: &TestInvocation,
    ctx: &InvokeContext<'_>,
) -> Result<(), String> {
    let options = ExecOptions {
        timeout: Some(ctx.reboot_timeout),
        ..ExecOptions::default()
    };
    guest_adapter
        .reboot(&test.guest, &options)
        .await
        .map_err(|err: GuestError| format!("reboot failed: {err}"))
}

/// Fields shared by every `TestResult` this invoker produces, before the
/// caller fills in outcome, subresults, and note.
fn base_result(test: &TestInvocation, ctx: &InvokeContext<'_>, start: Instant, start_epoch_ms: u64) -> TestResult {
    let data_path = ctx.workdir.test_data_dir(ctx.plan_slug, &test.name, test.serial_number.0);
    TestResult {
        test_id: test.name.clone(),
        serial_number: test.serial_number,
        guest: test.guest.clone(),
        guest_role: ctx.guest_role,
        outcome: Outcome::Pass,
        original_outcome: Outcome::Pass,
        subresults: Vec::new(),
        checks: Vec::new(),
        note: Vec::new(),
        duration_ms: start.elapsed().as_millis() as u64,
        start_time_ms: start_epoch_ms,
        end_time_ms: SystemClock.epoch_ms(),
        context: ctx.plan_context.as_map(),
        data_path: data_path.display().to_string(),
        ids: vec![test.id.to_string()],
        log: Vec::new(),
    }
}

fn build_result(
    test: &TestInvocation,
    ctx: &InvokeContext<'_>,
    start: Instant,
    start_epoch_ms: u64,
    original_outcome: Outcome,
    interpreted: Outcome,
    subresults: Vec<Subresult>,
) -> TestResult {
    let mut result = base_result(test, ctx, start, start_epoch_ms);
    result.original_outcome = original_outcome;
    result.outcome = TestResult::reduce(interpreted, &subresults, &[]);
    result.subresults = subresults;
    result
}

fn error_result(test: &TestInvocation, ctx: &InvokeContext<'_>, start: Instant, start_epoch_ms: u64, note: impl Into<String>) -> TestResult {
    let mut result = base_result(test, ctx, start, start_epoch_ms);
    result.outcome = Outcome::Error;
    result.original_outcome = Outcome::Error;
    result.note.push(note.into());
    result
}

/// Builds one independent Result per `tmt-report-result` line (spec
/// §4.5.7: `result: restraint` turns each call into its own Result
/// rather than a nested subresult). The first reuses the invocation's
/// own serial number; later ones mint a fresh one so the `(serial,
/// guest)`-keyed result store never collides two of them together.
fn build_restraint_results(
    test: &TestInvocation,
    ctx: &InvokeContext<'_>,
    start: Instant,
    start_epoch_ms: u64,
    subresults: &[Subresult],
) -> Vec<TestResult> {
    subresults
        .iter()
        .enumerate()
        .map(|(index, sub)| {
            let mut result = base_result(test, ctx, start, start_epoch_ms);
            result.test_id = format!("{}/{}", test.name, sub.name);
            result.serial_number = if index == 0 {
                test.serial_number
            } else {
                SerialNumber(ctx.extra_serial.fetch_add(1, Ordering::SeqCst))
            };
            result.outcome = sub.outcome;
            result.original_outcome = sub.outcome;
            result
        })
        .collect()
}

/// Scans test stdout for `tmt-report-result <name> <outcome>` lines,
/// emulating the shell helper a real guest-side test would call.
fn parse_subresults(stdout: &[u8]) -> Vec<Subresult> {
    let text = String::from_utf8_lossy(stdout);
    text.lines()
        .filter_map(|line| {
            let rest = line.strip_prefix("tmt-report-result ")?;
            let mut parts = rest.split_whitespace();
            let name = parts.next()?;
            let outcome_str = parts.next()?;
            let outcome: Outcome = outcome_str.parse().ok()?;
            Some(Subresult {
                name: name.to_string(),
                outcome,
                note: None,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "invoker_tests.rs"]
mod tests;
