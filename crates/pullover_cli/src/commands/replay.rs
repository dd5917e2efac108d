use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use pullover_app::{lint_scenario, run_loaded_scenario, HeadlessRunConfig, HeadlessScenario};

pub fn run(
    scenario_path: &Path,
    config_path: Option<&Path>,
    tick_ms: u64,
    report_path: Option<&Path>,
) -> Result<ExitCode> {
    let config = super::load_config(config_path)?;
    let scenario = HeadlessScenario::from_path(scenario_path)
        .with_context(|| format!("Failed to load scenario {}", scenario_path.display()))?;
    lint_scenario(&scenario)?;

    let runtime_cfg = HeadlessRunConfig {
        tick_ms,
        ..Default::default()
    };
    tracing::info!(
        "replaying {} ({} steps, {}ms frames)",
        scenario_path.display(),
        scenario.steps.len(),
        tick_ms
    );
    let outcome = run_loaded_scenario(&scenario, &config, runtime_cfg)?;
    let failed = outcome.is_failed();

    let report = outcome.into_report();
    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report_path {
        report
            .write_to_path(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    if failed {
        eprintln!(
            "replay failed at step {}: {}",
            report.failed_step_index.unwrap_or_default(),
            report.message.as_deref().unwrap_or("unknown failure")
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
