// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tmt - a declarative test-orchestration engine

mod config;
mod logging;

use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use config::{EngineConfig, TracebackLevel};
use std::path::PathBuf;
use std::sync::Arc;
use tmt_core::id::{IdGen, UuidIdGen};
use tmt_core::outcome::Outcome;
use tmt_core::plan::PlanId;
use tmt_core::step::StepKind;
use tmt_core::Context;
use tmt_engine::{merge_rerun_results, plan_rerun_tests, RerunMode, Runtime, RuntimeConfig, RuntimeDeps, TracingProgressSink};
use tmt_runbook::PlanDef;
use tmt_storage::{ResultStore, Workdir};

#[derive(Parser)]
#[command(name = "tmt", version, about = "Run a plan's steps against its guests")]
struct Cli {
    /// Resolved plan definition, already expanded by the metadata loader
    /// (spec §1/§6: the hierarchical loader itself is out of scope here)
    plan: PathBuf,

    /// Plan name; defaults to the plan file's stem
    #[arg(long)]
    name: Option<String>,

    /// Context key=value pair, repeatable (spec §4.1)
    #[arg(short = 'c', long = "context", value_parser = parse_context_pair)]
    context: Vec<(String, String)>,

    /// Resume/create the run at this absolute path instead of allocating
    /// a fresh one (spec §6: run identifier)
    #[arg(long, value_name = "PATH", conflicts_with = "last")]
    id: Option<PathBuf>,

    /// Reuse the most recently started run
    #[arg(long)]
    last: bool,

    /// Purge the run directory before starting
    #[arg(long)]
    scratch: bool,

    /// Skip a step entirely, repeatable
    #[arg(long = "skip", value_enum)]
    skip: Vec<StepArg>,

    /// Re-execute a previous run's tests against its existing workdir
    /// (spec §4.6)
    #[arg(long)]
    again: bool,

    /// With --again, restrict the rerun to tests whose prior result was
    /// `fail` or `error`
    #[arg(long = "failed-only", requires = "again")]
    failed_only: bool,

    /// Mark the first failing test and skip everything not yet started
    /// (spec §4.5 step 6)
    #[arg(long = "exit-first")]
    exit_first: bool,

    /// Validate the plan without touching a real guest (backs a
    /// NoopGuestAdapter)
    #[arg(long)]
    dry: bool,

    /// Verbose engine logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum StepArg {
    Discover,
    Provision,
    Prepare,
    Execute,
    Report,
    Finish,
}

impl From<StepArg> for StepKind {
    fn from(value: StepArg) -> Self {
        match value {
            StepArg::Discover => StepKind::Discover,
            StepArg::Provision => StepKind::Provision,
            StepArg::Prepare => StepKind::Prepare,
            StepArg::Execute => StepKind::Execute,
            StepArg::Report => StepKind::Report,
            StepArg::Finish => StepKind::Finish,
        }
    }
}

fn parse_context_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(err) => {
            let engine_config = EngineConfig::from_env();
            eprintln!("Error: {}", format_error(&err, engine_config.traceback_level));
            3
        }
    };
    std::process::exit(exit_code);
}

/// Runs the CLI end to end, returning the process exit code on success
/// (spec §6: `0`/`1`/`2`) and `Err` only for an internal engine error
/// that should map to `3`.
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let engine_config = EngineConfig::from_env();

    let context = cli.context.iter().fold(Context::new(), |ctx, (k, v)| ctx.with(k.clone(), v.clone()));

    let yaml = std::fs::read_to_string(&cli.plan)
        .with_context(|| format!("reading plan definition {}", cli.plan.display()))?;
    let plan_def = PlanDef::from_yaml_with_context(&yaml, &context).context("parsing plan definition")?;

    let plan_name = cli.name.clone().unwrap_or_else(|| {
        cli.plan.file_stem().and_then(|s| s.to_str()).unwrap_or("plan").to_string()
    });
    let plan_id = PlanId::new(format!("/plans/{plan_name}"));
    let mut plan = plan_def.materialize(plan_id, plan_name.clone(), context).context("materializing plan")?;

    for skip in &cli.skip {
        let step: StepKind = (*skip).into();
        plan.step_config.insert(step.as_str().to_string(), tmt_core::plan::StepConfig { enabled: false });
    }

    let run_id_gen = UuidIdGen;
    let (workdir, run_id) = resolve_workdir(&cli, &engine_config, &run_id_gen)?;
    if cli.scratch && workdir.root().exists() {
        std::fs::remove_dir_all(workdir.root()).with_context(|| format!("purging {}", workdir.root().display()))?;
    }
    std::fs::create_dir_all(workdir.root())?;

    let _logging_guard = logging::init(&workdir.log_txt(), cli.debug).context("initializing logging")?;

    let plan_slug = slugify(&plan_name);
    tmt_storage::save_plan(&workdir, &plan_slug, &plan).context("saving plan.yaml")?;

    let guest_adapter: Arc<dyn tmt_adapters::GuestAdapter> = if cli.dry {
        Arc::new(tmt_adapters::NoopGuestAdapter)
    } else {
        Arc::new(tmt_adapters::LocalGuestAdapter)
    };
    let report_sink: Arc<dyn tmt_adapters::ReportSink> =
        Arc::new(tmt_adapters::JsonlReportSink::new(workdir.plan_dir(&plan_slug).join("report.jsonl")));
    let deps = RuntimeDeps { guest_adapter, report_sink, progress: Arc::new(TracingProgressSink) };
    let runtime_config = RuntimeConfig {
        reboot_timeout: engine_config.reboot_timeout,
        report_artifacts_url: None,
        debug: cli.debug,
        exit_first: cli.exit_first,
    };
    let runtime = Runtime::new(deps, runtime_config, workdir.clone(), run_id);

    let summary = if cli.again {
        run_rerun(&runtime, &plan, &plan_slug, &workdir, cli.failed_only).await?
    } else {
        runtime.run_plan(&plan, &plan_slug).await.context("running plan")?
    };

    Ok(exit_code_for(summary.worst_outcome()))
}

/// Runs `--again`/`--failed-only` (spec §4.6): executes the rerun's
/// selected tests against a clean result store, then folds the outcome
/// back into the plan's real `results.yaml`.
async fn run_rerun(
    runtime: &Runtime,
    plan: &tmt_core::Plan,
    plan_slug: &str,
    workdir: &Workdir,
    failed_only: bool,
) -> Result<tmt_engine::PlanRunSummary> {
    let previous_store = ResultStore::open(workdir, plan_slug).context("opening prior results")?;
    let previous = previous_store.results();

    let mode = if failed_only { RerunMode::FailedOnly } else { RerunMode::All };
    let mut rerun_plan = plan.clone();
    rerun_plan.tests = plan_rerun_tests(plan, &previous_store, mode);
    for step in [StepKind::Discover, StepKind::Provision] {
        rerun_plan.step_config.insert(step.as_str().to_string(), tmt_core::plan::StepConfig { enabled: false });
    }

    let results_path = workdir.results_yaml(plan_slug);
    let aside_path = results_path.with_extension("yaml.rerun-aside");
    if results_path.exists() {
        std::fs::rename(&results_path, &aside_path)?;
    }

    let summary = runtime.run_plan(&rerun_plan, plan_slug).await;

    let summary = match summary {
        Ok(summary) => summary,
        Err(err) => {
            if aside_path.exists() {
                std::fs::rename(&aside_path, &results_path)?;
            }
            return Err(err).context("running rerun");
        }
    };

    let merged = merge_rerun_results(&previous, &summary.results);
    tmt_storage::atomic::write_yaml(&results_path, &merged).context("writing merged results.yaml")?;
    if aside_path.exists() {
        std::fs::remove_file(&aside_path)?;
    }

    Ok(tmt_engine::PlanRunSummary { results: merged })
}

fn resolve_workdir(cli: &Cli, config: &EngineConfig, run_id_gen: &impl IdGen) -> Result<(Workdir, String)> {
    let last_pointer = config.workdir_root.join("last-run");

    if let Some(path) = &cli.id {
        if !path.is_absolute() {
            return Err(anyhow!("--id requires an absolute path, got {}", path.display()));
        }
        let run_id = path.file_name().and_then(|n| n.to_str()).unwrap_or("run").to_string();
        std::fs::create_dir_all(&config.workdir_root)?;
        std::fs::write(&last_pointer, path.to_string_lossy().as_bytes())?;
        return Ok((Workdir::new(path.clone()), run_id));
    }

    if cli.last {
        let recorded = std::fs::read_to_string(&last_pointer)
            .with_context(|| format!("no previous run recorded at {}", last_pointer.display()))?;
        let path = PathBuf::from(recorded.trim());
        let run_id = path.file_name().and_then(|n| n.to_str()).unwrap_or("run").to_string();
        return Ok((Workdir::new(path), run_id));
    }

    let run_id = run_id_gen.next();
    let path = config.workdir_root.join("runs").join(&run_id);
    std::fs::create_dir_all(&config.workdir_root)?;
    std::fs::write(&last_pointer, path.to_string_lossy().as_bytes())?;
    Ok((Workdir::new(path), run_id))
}

fn slugify(name: &str) -> String {
    let trimmed = name.trim_start_matches('/');
    let slug: String = trimmed.chars().map(|c| if c.is_alphanumeric() { c } else { '-' }).collect();
    if slug.is_empty() { "plan".to_string() } else { slug }
}

/// Exit codes per spec §6: `0` every outcome in `{pass, info}`, `1` at
/// least one `fail`, `2` at least one `error`. An empty result set (no
/// tests ran) is a valid, successful run.
fn exit_code_for(worst: Option<Outcome>) -> i32 {
    match worst {
        None => 0,
        Some(Outcome::Error) => 2,
        Some(Outcome::Fail) => 1,
        Some(_) => 0,
    }
}

/// Formats an anyhow error for `--debug`/`TMT_SHOW_TRACEBACK`: by
/// default just the top-level message, escalating to the full cause
/// chain (spec §7: internal engine errors print a traceback at
/// verbosity 1/2).
fn format_error(err: &anyhow::Error, level: TracebackLevel) -> String {
    if level == TracebackLevel::Message {
        return err.to_string();
    }
    let mut buf = err.to_string();
    for cause in err.chain().skip(1) {
        buf.push_str(&format!("\ncaused by: {cause}"));
    }
    buf
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
