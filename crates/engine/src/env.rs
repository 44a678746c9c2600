// SPDX-License-Identifier: MIT

//! Per-test environment layering (spec §4.5.1): plan environment first,
//! then the test's own, then run-scoped variables the engine injects and
//! that a test's own environment can never shadow.

use std::collections::HashMap;
use tmt_core::invocation::SerialNumber;
use tmt_storage::Workdir;

pub struct TestEnvContext<'a> {
    pub plan_environment: &'a HashMap<String, String>,
    pub test_environment: &'a HashMap<String, String>,
    pub workdir: &'a Workdir,
    pub plan_slug: &'a str,
    pub test_id: &'a str,
    pub run_id: &'a str,
    pub serial: SerialNumber,
    pub reboot_count: u32,
    pub restart_count: u32,
    pub report_artifacts_url: Option<&'a str>,
    pub debug: bool,
}

/// Builds the full environment for one test invocation attempt, layering
/// lowest-to-highest: plan environment, test environment, then the
/// engine's own run-scoped variables.
pub fn build_test_env(ctx: &TestEnvContext<'_>) -> HashMap<String, String> {
    let mut env = HashMap::new();
    env.extend(ctx.plan_environment.clone());
    env.extend(ctx.test_environment.clone());

    let test_data_dir = ctx.workdir.test_data_dir(ctx.plan_slug, ctx.test_id, ctx.serial.0);
    let plan_data_dir = ctx.workdir.plan_dir(ctx.plan_slug).join("execute/data");
    let scripts_dir = ctx.workdir.root().join("scripts");

    env.insert("TMT_PLAN_DATA".to_string(), plan_data_dir.display().to_string());
    env.insert("TMT_TEST_DATA".to_string(), test_data_dir.join("data").display().to_string());
    env.insert("TMT_TREE".to_string(), ctx.workdir.root().display().to_string());
    env.insert(
        "TMT_TOPOLOGY_BASH".to_string(),
        ctx.workdir.plan_dir(ctx.plan_slug).join("topology.sh").display().to_string(),
    );
    env.insert(
        "TMT_TOPOLOGY_YAML".to_string(),
        ctx.workdir.plan_dir(ctx.plan_slug).join("topology.yaml").display().to_string(),
    );
    env.insert("TMT_REBOOT_COUNT".to_string(), ctx.reboot_count.to_string());
    env.insert("TMT_TEST_RESTART_COUNT".to_string(), ctx.restart_count.to_string());
    env.insert("TMT_TEST_ITERATION_ID".to_string(), format!("{}-{}", ctx.run_id, ctx.serial));
    env.insert("TMT_TEST_PIDFILE".to_string(), test_data_dir.join("pidfile").display().to_string());
    env.insert("TMT_TEST_PIDFILE_LOCK".to_string(), test_data_dir.join("pidfile.lock").display().to_string());
    env.insert("TMT_SCRIPTS_DIR".to_string(), scripts_dir.display().to_string());
    if let Some(url) = ctx.report_artifacts_url {
        env.insert("TMT_REPORT_ARTIFACTS_URL".to_string(), url.to_string());
    }
    env.insert("TMT_DEBUG".to_string(), if ctx.debug { "1" } else { "0" }.to_string());

    env
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
