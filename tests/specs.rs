// SPDX-License-Identifier: MIT

//! End-to-end scenarios driving a whole plan through the real shell
//! executor, exercising the invoker's restart/reboot loops and the
//! runtime's phase barrier against actual child processes rather than
//! scripted doubles.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tmt_adapters::error::GuestError;
use tmt_adapters::{GuestAdapter, LocalGuestAdapter, NoopReportSink, ReportSink};
use tmt_core::context::Context;
use tmt_core::guest::{Guest, GuestCapabilities, GuestId};
use tmt_core::invocation::{RestartPolicy, TestInvocation, TestInvocationId};
use tmt_core::outcome::Outcome;
use tmt_core::phase::Phase;
use tmt_core::plan::{Plan, PlanId, StepConfig};
use tmt_core::step::StepKind;
use tmt_engine::{merge_rerun_results, plan_rerun_tests, RerunMode};
use tmt_engine::{NoopProgressSink, Runtime, RuntimeConfig, RuntimeDeps};
use tmt_shell::{CommandOutput, ExecOptions};
use tmt_storage::{ResultStore, Workdir};

fn report_sink() -> Arc<dyn ReportSink> {
    Arc::new(NoopReportSink::default())
}

fn runtime(workdir: &Workdir, adapter: Arc<dyn GuestAdapter>, run_id: &str) -> Runtime {
    Runtime::new(
        RuntimeDeps { guest_adapter: adapter, report_sink: report_sink(), progress: Arc::new(NoopProgressSink) },
        RuntimeConfig::default(),
        workdir.clone(),
        run_id,
    )
}

fn one_guest_plan(plan_name: &str, guest_name: &str) -> Plan {
    let mut plan = Plan::new(PlanId::new(format!("/plans/{plan_name}")), plan_name, Context::new());
    plan.guests = vec![Guest::new(GuestId::new("g1"), guest_name)];
    plan
}

fn execute_phase() -> Phase {
    Phase::new("execute/how", StepKind::Execute, "tmt", 0)
}

/// Records every call an adapter makes, including the environment each
/// `run` was invoked with, and delegates actual execution to the real
/// shell so scripts can genuinely branch on `TMT_REBOOT_COUNT` /
/// `TMT_TEST_RESTART_COUNT`.
struct RecordingGuestAdapter {
    calls: Mutex<Vec<RecordedCall>>,
    can_reboot: bool,
}

#[derive(Clone)]
struct RecordedCall {
    guest: String,
    command: String,
    env: HashMap<String, String>,
}

impl RecordingGuestAdapter {
    fn new(can_reboot: bool) -> Self {
        Self { calls: Mutex::new(Vec::new()), can_reboot }
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl GuestAdapter for RecordingGuestAdapter {
    async fn run(&self, guest: &str, command: &str, options: &ExecOptions) -> Result<CommandOutput, GuestError> {
        self.calls.lock().push(RecordedCall {
            guest: guest.to_string(),
            command: command.to_string(),
            env: options.env.clone(),
        });
        tmt_shell::execute(command, options).await.map_err(GuestError::from)
    }

    async fn reboot(&self, guest: &str, _options: &ExecOptions) -> Result<(), GuestError> {
        self.calls.lock().push(RecordedCall { guest: guest.to_string(), command: "<reboot>".to_string(), env: HashMap::new() });
        if self.can_reboot {
            Ok(())
        } else {
            Err(GuestError::Unsupported("reboot not supported by this adapter"))
        }
    }

    fn capabilities(&self, _guest: &str) -> GuestCapabilities {
        GuestCapabilities { can_reboot: self.can_reboot, can_push_workdir: false }
    }
}

/// Scenario: smoke. A single test on a single guest exits zero and is
/// reported `pass`.
#[tokio::test]
async fn smoke_test_passes_on_its_only_guest() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let mut plan = one_guest_plan("smoke", "default-0");
    plan.phases = vec![execute_phase()];
    let mut test = TestInvocation::new(TestInvocationId::new("/t"), "/t", "exit 0");
    test.guest = "default-0".to_string();
    plan.tests = vec![test];

    let summary = runtime(&workdir, Arc::new(LocalGuestAdapter), "run-1").run_plan(&plan, "smoke").await.unwrap();

    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].outcome, Outcome::Pass);
    assert_eq!(summary.results[0].guest, "default-0");
    assert_eq!(summary.worst_outcome(), Some(Outcome::Pass));
}

/// Scenario: a test configured to restart on a specific exit code keeps
/// failing past its restart budget and ends in `fail`, noting the limit
/// was reached, having been invoked exactly `max_restarts + 1` times
/// with an incrementing `TMT_TEST_RESTART_COUNT`.
#[tokio::test]
async fn a_test_that_exhausts_its_restart_budget_ends_in_fail() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let mut plan = one_guest_plan("restarts", "default-0");
    plan.phases = vec![execute_phase()];
    let mut test = TestInvocation::new(TestInvocationId::new("/r"), "/r", "exit 79");
    test.guest = "default-0".to_string();
    test.restart_policy = RestartPolicy { max_restarts: 1, on_exit_codes: vec![79] };
    plan.tests = vec![test];

    let adapter = Arc::new(RecordingGuestAdapter::new(false));
    let summary = runtime(&workdir, adapter.clone(), "run-1").run_plan(&plan, "restarts").await.unwrap();

    assert_eq!(summary.results.len(), 1);
    let result = &summary.results[0];
    assert_eq!(result.outcome, Outcome::Fail);
    assert!(result.note.contains(&"restart limit reached after 1 restart(s)".to_string()));

    let calls = adapter.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].env.get("TMT_TEST_RESTART_COUNT").map(String::as_str), Some("0"));
    assert_eq!(calls[1].env.get("TMT_TEST_RESTART_COUNT").map(String::as_str), Some("1"));
}

/// Scenario: a test that exits with the reboot marker triggers a real
/// guest reboot, then resumes and passes on the next attempt, with
/// `TMT_REBOOT_COUNT` incrementing across the two attempts.
#[tokio::test]
async fn a_rebooting_test_resumes_and_passes_after_the_guest_comes_back() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let mut plan = one_guest_plan("reboot", "default-0");
    plan.phases = vec![execute_phase()];
    let mut test = TestInvocation::new(
        TestInvocationId::new("/b"),
        "/b",
        "if [ \"$TMT_REBOOT_COUNT\" = \"0\" ]; then exit 199; else exit 0; fi",
    );
    test.guest = "default-0".to_string();
    plan.tests = vec![test];

    let adapter = Arc::new(RecordingGuestAdapter::new(true));
    let summary = runtime(&workdir, adapter.clone(), "run-1").run_plan(&plan, "reboot").await.unwrap();

    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].outcome, Outcome::Pass);

    let calls = adapter.calls();
    let runs: Vec<&RecordedCall> = calls.iter().filter(|c| c.command != "<reboot>").collect();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].env.get("TMT_REBOOT_COUNT").map(String::as_str), Some("0"));
    assert_eq!(runs[1].env.get("TMT_REBOOT_COUNT").map(String::as_str), Some("1"));
    assert!(calls.iter().any(|c| c.command == "<reboot>"));
}

/// Scenario: multi-host barrier. A discover-step phase that only targets
/// the server must complete on every matching guest before a later
/// discover-step phase that targets both server and client starts on
/// either of them; both guests then get their own Execute-step result.
#[tokio::test]
async fn a_phase_restricted_to_one_guest_completes_before_a_later_phase_touching_both() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let mut plan = Plan::new(PlanId::new("/plans/barrier"), "barrier", Context::new());
    plan.guests = vec![Guest::new(GuestId::new("g1"), "server"), Guest::new(GuestId::new("g2"), "client")];
    plan.phases = vec![
        Phase::new("discover/setup", StepKind::Discover, "shell", 0)
            .with_where(vec!["server".to_string()])
            .with_script(Some("echo setup".to_string())),
        Phase::new("discover/run", StepKind::Discover, "shell", 1).with_script(Some("echo run".to_string())),
        execute_phase(),
    ];
    for guest_name in ["server", "client"] {
        let mut test = TestInvocation::new(TestInvocationId::new(format!("/t@{guest_name}")), "/t", "exit 0");
        test.guest = guest_name.to_string();
        plan.tests.push(test);
    }

    let adapter = Arc::new(RecordingGuestAdapter::new(false));
    let summary = runtime(&workdir, adapter.clone(), "run-1").run_plan(&plan, "barrier").await.unwrap();

    let calls = adapter.calls();
    let last_setup = calls.iter().rposition(|c| c.command == "echo setup").expect("setup ran");
    let first_run = calls.iter().position(|c| c.command == "echo run").expect("run ran");
    assert!(last_setup < first_run, "setup phase must fully finish before the shared phase starts");

    assert_eq!(calls.iter().filter(|c| c.command == "echo setup").count(), 1);
    assert_eq!(calls.iter().filter(|c| c.command == "echo run").count(), 2);

    assert_eq!(summary.results.len(), 2);
    assert!(summary.results.iter().any(|r| r.guest == "server" && r.outcome == Outcome::Pass));
    assert!(summary.results.iter().any(|r| r.guest == "client" && r.outcome == Outcome::Pass));
}

/// Scenario: subresult reduction. A test body exits zero but emits a
/// failing `tmt-report-result` line, so the overall outcome is pulled
/// down to the worst of body and subresults.
#[tokio::test]
async fn a_failing_subresult_pulls_down_an_otherwise_passing_test() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let mut plan = one_guest_plan("subresults", "default-0");
    plan.phases = vec![execute_phase()];
    let mut test = TestInvocation::new(
        TestInvocationId::new("/s"),
        "/s",
        "echo 'tmt-report-result A PASS'; echo 'tmt-report-result B FAIL'; echo 'tmt-report-result C PASS'; exit 0",
    );
    test.guest = "default-0".to_string();
    plan.tests = vec![test];

    let summary = runtime(&workdir, Arc::new(LocalGuestAdapter), "run-1").run_plan(&plan, "subresults").await.unwrap();

    assert_eq!(summary.results.len(), 1);
    let result = &summary.results[0];
    assert_eq!(result.outcome, Outcome::Fail);
    assert_eq!(result.subresults.len(), 3);
    assert!(result.subresults.iter().any(|s| s.name == "B" && s.outcome == Outcome::Fail));
}

/// Scenario: a statically disabled phase never runs even though it has
/// no `when` rule to exclude it.
#[tokio::test]
async fn a_disabled_phase_is_skipped_regardless_of_when() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let mut plan = one_guest_plan("disabled", "default-0");
    plan.phases = vec![
        Phase::new("prepare/install", StepKind::Prepare, "shell", 0)
            .with_script(Some("echo installed".to_string()))
            .with_enabled(false),
        execute_phase(),
    ];
    let mut test = TestInvocation::new(TestInvocationId::new("/t"), "/t", "exit 0");
    test.guest = "default-0".to_string();
    plan.tests = vec![test];

    let adapter = Arc::new(RecordingGuestAdapter::new(false));
    let summary = runtime(&workdir, adapter.clone(), "run-1").run_plan(&plan, "disabled").await.unwrap();

    assert!(!adapter.calls().iter().any(|c| c.command == "echo installed"));
    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].outcome, Outcome::Pass);
}

/// Scenario: an execute phase whose `where` matches no active guest taints
/// the step instead of silently completing with zero jobs.
#[tokio::test]
async fn an_execute_phase_with_no_matching_guest_fails_the_step() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let mut plan = one_guest_plan("no-guest", "default-0");
    plan.phases = vec![execute_phase().with_where(vec!["nonexistent".to_string()])];
    let mut test = TestInvocation::new(TestInvocationId::new("/t"), "/t", "exit 0");
    test.guest = "default-0".to_string();
    plan.tests = vec![test];

    let adapter = Arc::new(RecordingGuestAdapter::new(false));
    let summary = runtime(&workdir, adapter.clone(), "run-1").run_plan(&plan, "no-guest").await.unwrap();

    assert!(adapter.calls().is_empty());
    assert!(summary.results.is_empty());
}

/// Scenario: `result: restraint` turns each `tmt-report-result` call into
/// its own independent Result rather than a nested subresult.
#[tokio::test]
async fn restraint_policy_yields_one_result_per_reported_line() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let mut plan = one_guest_plan("restraint", "default-0");
    plan.phases = vec![execute_phase()];
    let mut test = TestInvocation::new(
        TestInvocationId::new("/r"),
        "/r",
        "echo 'tmt-report-result first PASS'; echo 'tmt-report-result second FAIL'; exit 0",
    );
    test.guest = "default-0".to_string();
    test.result_policy = tmt_core::invocation::ResultPolicy::Restraint;
    plan.tests = vec![test];

    let summary = runtime(&workdir, Arc::new(LocalGuestAdapter), "run-1").run_plan(&plan, "restraint").await.unwrap();

    assert_eq!(summary.results.len(), 2);
    assert!(summary.results.iter().any(|r| r.outcome == Outcome::Pass && r.test_id.ends_with("first")));
    assert!(summary.results.iter().any(|r| r.outcome == Outcome::Fail && r.test_id.ends_with("second")));
    let serials: std::collections::HashSet<_> = summary.results.iter().map(|r| r.serial_number).collect();
    assert_eq!(serials.len(), 2, "each independent restraint result needs its own serial number");
}

/// Scenario: rerun with `--failed-only`. A plan runs once with one
/// passing and one failing test; a rerun restricted to failed tests
/// re-executes only the failing one and the merged results.yaml both
/// keeps the untouched passing entry and reflects the rerun's outcome
/// for the other.
#[tokio::test]
async fn failed_only_rerun_only_touches_previously_failing_tests() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let mut plan = one_guest_plan("rerun", "default-0");
    plan.phases = vec![execute_phase()];
    let mut passing = TestInvocation::new(TestInvocationId::new("/ok"), "/ok", "exit 0");
    passing.guest = "default-0".to_string();
    let mut failing = TestInvocation::new(TestInvocationId::new("/bad"), "/bad", "exit 1");
    failing.guest = "default-0".to_string();
    plan.tests = vec![passing, failing];

    let first = runtime(&workdir, Arc::new(LocalGuestAdapter), "run-1").run_plan(&plan, "rerun").await.unwrap();
    assert_eq!(first.results.len(), 2);

    // Flip the failing test's script so a rerun would now pass it, and
    // confirm only that one test gets re-invoked.
    plan.tests[1].command = "exit 0".to_string();

    let store = ResultStore::open(&workdir, "rerun").unwrap();
    let previous = store.results();
    let mut rerun_plan = plan.clone();
    rerun_plan.tests = plan_rerun_tests(&plan, &store, RerunMode::FailedOnly);
    assert_eq!(rerun_plan.tests.len(), 1);
    assert_eq!(rerun_plan.tests[0].name, "/bad");
    for step in [StepKind::Discover, StepKind::Provision] {
        rerun_plan.step_config.insert(step.as_str().to_string(), StepConfig { enabled: false });
    }

    let results_path = workdir.results_yaml("rerun");
    let aside_path = results_path.with_extension("yaml.rerun-aside");
    std::fs::rename(&results_path, &aside_path).unwrap();

    let rerun_summary = runtime(&workdir, Arc::new(LocalGuestAdapter), "run-2").run_plan(&rerun_plan, "rerun").await.unwrap();
    assert_eq!(rerun_summary.results.len(), 1);
    assert_eq!(rerun_summary.results[0].outcome, Outcome::Pass);

    let merged = merge_rerun_results(&previous, &rerun_summary.results);
    tmt_storage::atomic::write_yaml(&results_path, &merged).unwrap();
    std::fs::remove_file(&aside_path).unwrap();

    assert_eq!(merged.len(), 2);
    let ok_entry = merged.iter().find(|r| r.test_id.contains("/ok")).expect("passing test preserved");
    assert_eq!(ok_entry.outcome, Outcome::Pass);
    let bad_entry = merged.iter().find(|r| r.test_id.contains("/bad")).expect("rerun result merged in");
    assert_eq!(bad_entry.outcome, Outcome::Pass);

    let reloaded = ResultStore::open(&workdir, "rerun").unwrap();
    assert_eq!(reloaded.results().len(), 2);
}
