// SPDX-License-Identifier: MIT

//! Ties effect execution to plan state (spec §4.3, §4.4, §4.5): walks a
//! materialized plan through the fixed step order, fanning each phase
//! out across its guests through the dispatcher, and routing finished
//! test results through the result store and report sink. Grounded on
//! the teacher's effect executor — structured tracing spans around
//! every unit of work, state mutated only through emitted events.

use crate::dispatcher::{dispatch_phase, GuestJob};
use crate::error::RuntimeError;
use crate::invoker::{self, InvokeContext};
use crate::progress::ProgressSink;
use crate::step_engine::{self};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tmt_adapters::{GuestAdapter, ReportSink};
use tmt_core::invocation::TestInvocation;
use tmt_core::plan::Plan;
use tmt_core::step::{StepKind, StepState};
use tmt_core::{Effect, Event};
use tmt_shell::ExecOptions;
use tmt_storage::{ResultStore, Workdir};

/// Engine-wide knobs threaded explicitly through [`Runtime`] rather than
/// held in a module-level singleton (spec §9 Design Notes).
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub reboot_timeout: Duration,
    pub report_artifacts_url: Option<String>,
    pub debug: bool,
    /// `execute --exit-first` (spec §4.5 step 6): the first `fail`/`error`
    /// marks every not-yet-started test `skip` with note `aborted`.
    pub exit_first: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            reboot_timeout: Duration::from_secs(600),
            report_artifacts_url: None,
            debug: false,
            exit_first: false,
        }
    }
}

pub struct RuntimeDeps {
    pub guest_adapter: Arc<dyn GuestAdapter>,
    pub report_sink: Arc<dyn ReportSink>,
    pub progress: Arc<dyn ProgressSink>,
}

pub struct Runtime {
    deps: RuntimeDeps,
    config: RuntimeConfig,
    workdir: Workdir,
    run_id: String,
}

/// What a plan run produced, handed back to the CLI for exit-code mapping
/// (spec §6: `0` all pass, `1` a fail, `2` an error).
pub struct PlanRunSummary {
    pub results: Vec<tmt_core::result::TestResult>,
}

impl PlanRunSummary {
    pub fn worst_outcome(&self) -> Option<tmt_core::outcome::Outcome> {
        if self.results.is_empty() {
            return None;
        }
        Some(tmt_core::outcome::Outcome::reduce(self.results.iter().map(|r| r.outcome)))
    }
}

impl Runtime {
    pub fn new(deps: RuntimeDeps, config: RuntimeConfig, workdir: Workdir, run_id: impl Into<String>) -> Self {
        Self { deps, config, workdir, run_id: run_id.into() }
    }

    fn emit(&self, effects: Vec<Effect>) {
        for effect in effects {
            let span = tracing::info_span!("effect", effect = effect.name());
            let _guard = span.enter();
            if let Effect::Emit { event } = effect {
                self.deps.progress.on_event(&event);
            }
        }
    }

    pub async fn run_plan(&self, plan: &Plan, plan_slug: &str) -> Result<PlanRunSummary, RuntimeError> {
        let result_store = Arc::new(ResultStore::open(&self.workdir, plan_slug)?);
        let mut plan_failed = false;
        let mut aborted = false;
        // Extra independent Results a `result: restraint` test produces
        // beyond its own need serial numbers that can't collide with any
        // materialize-assigned one (spec §4.5.7, §5).
        let extra_serial = Arc::new(AtomicU32::new(
            plan.tests.iter().map(|t| t.serial_number.0).max().unwrap_or(0) + 1,
        ));

        for step in tmt_core::step::STEP_ORDER {
            if !plan.step_enabled(step) {
                continue;
            }
            // `finish` runs best-effort even if a prior step failed; every
            // other step is skipped once the plan has already failed.
            if plan_failed && step != StepKind::Finish && step != StepKind::Report {
                continue;
            }

            self.emit(step_engine::step_start_effects(&plan.id, step));

            let state = match step {
                StepKind::Execute => {
                    self.run_execute_step(plan, plan_slug, &result_store, &mut aborted, &extra_serial).await?
                }
                StepKind::Report => {
                    self.run_report_step(&result_store).await?
                }
                _ => self.run_generic_step(plan, step).await?,
            };

            if state == StepState::Failed {
                plan_failed = true;
            }
            self.emit(step_engine::step_completed_effects(&plan.id, step, state));
        }

        self.emit(vec![Effect::Emit { event: Event::RunCompleted { run_id: tmt_core::run::RunId::new(self.run_id.clone()) } }]);

        Ok(PlanRunSummary { results: result_store.results() })
    }

    /// Runs every selected phase of a non-`execute`, non-`report` step by
    /// shelling out `phase.script` on each resolved guest. A phase with
    /// no script (a `how` this engine does not implement a concrete
    /// plugin for) is a documented no-op — see DESIGN.md.
    async fn run_generic_step(&self, plan: &Plan, step: StepKind) -> Result<StepState, RuntimeError> {
        let phases = step_engine::selected_phases(plan, step).map_err(|err| RuntimeError::Internal(err.to_string()))?;
        let mut tainted = false;

        for phase in &phases {
            self.emit(step_engine::phase_started_effects(&plan.id, step, &phase.id));

            let guests = step_engine::resolve_guests(plan, phase);
            if guests.is_empty() {
                self.emit(step_engine::phase_failed_effects(&plan.id, step, &phase.id, "where matched no active guests"));
                tainted = true;
                continue;
            }

            let Some(script) = phase.script.clone() else {
                self.emit(step_engine::phase_completed_effects(&plan.id, step, &phase.id, None));
                continue;
            };

            let jobs: Vec<(String, GuestJob)> = guests
                .into_iter()
                .map(|guest| {
                    let guest = guest.to_string();
                    let guest_key = guest.clone();
                    let adapter = Arc::clone(&self.deps.guest_adapter);
                    let script = script.clone();
                    let job: GuestJob = Box::pin(async move {
                        let output = adapter
                            .run(&guest, &script, &ExecOptions::default())
                            .await
                            .map_err(RuntimeError::GuestCommunication)?;
                        if output.exit_code != Some(0) {
                            return Err(RuntimeError::Internal(format!(
                                "phase exited with code {:?}",
                                output.exit_code
                            )));
                        }
                        Ok(())
                    });
                    (guest_key, job)
                })
                .collect();

            let outcomes = dispatch_phase(jobs, phase.sequential).await;
            let failures: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
            if failures.is_empty() {
                self.emit(step_engine::phase_completed_effects(&plan.id, step, &phase.id, None));
            } else {
                tainted = true;
                for failure in failures {
                    let message = match &failure.result {
                        Err(err) => format!("guest {}: {err}", failure.guest),
                        Ok(()) => unreachable!(),
                    };
                    self.emit(step_engine::phase_failed_effects(&plan.id, step, &phase.id, message));
                }
            }
        }

        Ok(if tainted { StepState::Failed } else { StepState::Done })
    }

    async fn run_execute_step(
        &self,
        plan: &Plan,
        plan_slug: &str,
        result_store: &Arc<ResultStore>,
        aborted: &mut bool,
        extra_serial: &Arc<AtomicU32>,
    ) -> Result<StepState, RuntimeError> {
        let phases = step_engine::selected_phases(plan, StepKind::Execute)
            .map_err(|err| RuntimeError::Internal(err.to_string()))?;
        let mut tainted = false;

        for phase in &phases {
            self.emit(step_engine::phase_started_effects(&plan.id, StepKind::Execute, &phase.id));

            let guests = step_engine::resolve_guests(plan, phase);
            if guests.is_empty() {
                self.emit(step_engine::phase_failed_effects(
                    &plan.id,
                    StepKind::Execute,
                    &phase.id,
                    "where matched no active guests",
                ));
                tainted = true;
                continue;
            }

            let jobs: Vec<(String, GuestJob)> = guests
                .into_iter()
                .map(|guest| {
                    let guest = guest.to_string();
                    let guest_role = plan.guest_by_name(&guest).map(|g| g.role).unwrap_or_default();
                    let tests: Vec<TestInvocation> = plan.tests_for_guest(&guest).cloned().collect();
                    let adapter = Arc::clone(&self.deps.guest_adapter);
                    let store = Arc::clone(result_store);
                    let progress = Arc::clone(&self.deps.progress);
                    let workdir = self.workdir.clone();
                    let plan_environment = plan.environment.clone();
                    let plan_context = plan.context.clone();
                    let plan_slug = plan_slug.to_string();
                    let plan_id = plan.id.clone();
                    let run_id = self.run_id.clone();
                    let reboot_timeout = self.config.reboot_timeout;
                    let report_artifacts_url = self.config.report_artifacts_url.clone();
                    let debug = self.config.debug;
                    let exit_first = self.config.exit_first;
                    let already_aborted = *aborted;
                    let extra_serial = Arc::clone(extra_serial);

                    // A test failing is an ordinary Result, not an engine
                    // fault: this job only ever returns `Err` for a
                    // genuine result-store failure, so a test `fail`
                    // never trips the dispatcher's cross-guest abort.
                    let job: GuestJob = Box::pin(async move {
                        let mut local_abort = already_aborted;

                        for test in tests {
                            if local_abort {
                                let skipped = skipped_result(&test, guest_role, "aborted");
                                progress.on_event(&Event::TestFinished {
                                    plan_id: plan_id.clone(),
                                    invocation_id: test.id.clone(),
                                    result: skipped.clone(),
                                });
                                store.record(skipped)?;
                                continue;
                            }

                            progress.on_event(&Event::TestStarted {
                                plan_id: plan_id.clone(),
                                invocation_id: test.id.clone(),
                                serial_number: test.serial_number,
                            });

                            let ctx = InvokeContext {
                                workdir: &workdir,
                                plan_slug: &plan_slug,
                                plan_environment: &plan_environment,
                                plan_context: &plan_context,
                                run_id: &run_id,
                                guest_role,
                                reboot_timeout,
                                report_artifacts_url: report_artifacts_url.as_deref(),
                                debug,
                                extra_serial: &extra_serial,
                            };
                            let outcome = invoker::invoke(adapter.as_ref(), &test, &ctx).await;

                            for result in &outcome.results {
                                progress.on_event(&Event::TestFinished {
                                    plan_id: plan_id.clone(),
                                    invocation_id: test.id.clone(),
                                    result: result.clone(),
                                });
                            }

                            if outcome.aborted || outcome.results.iter().any(|r| exit_first && r.outcome.is_failure()) {
                                local_abort = true;
                            }

                            for result in outcome.results {
                                store.record(result)?;
                            }
                        }

                        Ok(())
                    });
                    (guest, job)
                })
                .collect();

            let outcomes = dispatch_phase(jobs, phase.sequential).await;
            if outcomes.iter().any(|o| o.result.is_err()) {
                tainted = true;
            }

            // A guest that hit `tmt-abort` stops claiming any remaining
            // tests in this plan's execute step, across phases, while
            // `finish` and `report` still run afterward (spec §4.5 step
            // 6, §7).
            if result_store.results().iter().any(|r| r.note.iter().any(|n| n == "aborted")) {
                *aborted = true;
            }

            self.emit(step_engine::phase_completed_effects(&plan.id, StepKind::Execute, &phase.id, None));
        }

        Ok(if tainted { StepState::Failed } else { StepState::Done })
    }

    async fn run_report_step(&self, result_store: &Arc<ResultStore>) -> Result<StepState, RuntimeError> {
        let mut tainted = false;
        for result in result_store.results() {
            // Reporting is best-effort per backend; a failing sink must
            // not change any Result outcome (spec §4.7).
            if let Err(err) = self.deps.report_sink.report(&result).await {
                tracing::warn!(test_id = %result.test_id, error = %err, "report sink failed");
                tainted = true;
            }
        }
        Ok(if tainted { StepState::Failed } else { StepState::Done })
    }
}

fn skipped_result(test: &TestInvocation, guest_role: tmt_core::guest::GuestRole, note: &str) -> tmt_core::result::TestResult {
    tmt_core::result::TestResult {
        test_id: test.name.clone(),
        serial_number: test.serial_number,
        guest: test.guest.clone(),
        guest_role,
        outcome: tmt_core::outcome::Outcome::Skip,
        original_outcome: tmt_core::outcome::Outcome::Skip,
        subresults: Vec::new(),
        checks: Vec::new(),
        note: vec![note.to_string()],
        duration_ms: 0,
        start_time_ms: 0,
        end_time_ms: 0,
        context: std::collections::HashMap::new(),
        data_path: String::new(),
        ids: vec![test.id.to_string()],
        log: Vec::new(),
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
