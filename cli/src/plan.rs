//! Step plans: TOML descriptions of a pipeline, turned into runnable steps.
//!
//! ```toml
//! [[step]]
//! name = "sync-courses"
//! delay_ms = 50
//!
//! [[step]]
//! name = "prefetch-files"
//! delay_ms = 500
//! blocking = false
//! requires_network = true
//! ```

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};
use tokio::time::Instant;

use tandem_config::NetworkConfig;
use tandem_core::{DeadlineError, Step, StepMode, delay_ms, with_deadline};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct Plan {
    #[serde(rename = "step", default)]
    pub steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanStep {
    pub name: String,
    /// Simulated work duration.
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default = "default_true")]
    pub blocking: bool,
    /// Fail once the work finishes.
    #[serde(default)]
    pub fail: bool,
    pub deadline_ms: Option<u64>,
    #[serde(default)]
    pub requires_network: bool,
}

impl Plan {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid step plan")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read plan {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }
}

/// Receiver shared by every step of a run.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub started: Instant,
    pub network: NetworkConfig,
}

impl RunContext {
    #[must_use]
    pub fn new(network: NetworkConfig) -> Self {
        Self {
            started: Instant::now(),
            network,
        }
    }
}

/// Builds the pipeline for `plan`. The first step carries `context`; the rest inherit it.
pub fn build_steps(
    plan: Plan,
    context: RunContext,
    default_deadline: Option<Duration>,
) -> Vec<Step<'static, RunContext, PlanStep, anyhow::Error>> {
    plan.steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| {
            let step = build_step(step, default_deadline);
            if index == 0 { step.with_receiver(context) } else { step }
        })
        .collect()
}

fn build_step(
    step: PlanStep,
    default_deadline: Option<Duration>,
) -> Step<'static, RunContext, PlanStep, anyhow::Error> {
    let mode = StepMode::from_blocking(step.blocking);
    Step::new(mode, step, move |context: Option<&RunContext>, step: PlanStep| {
        let context = *context
            .ok_or_else(|| anyhow!("step `{}` has no run context", step.name))?;
        if step.requires_network && !context.network.is_online(true) {
            bail!("step `{}` needs the network but offline mode is forced", step.name);
        }
        let deadline = step.deadline_ms.map(Duration::from_millis).or(default_deadline);

        Ok(async move {
            let outcome = match deadline {
                Some(deadline) => with_deadline(simulate(&step), deadline)
                    .await
                    .map_err(|err| match err {
                        DeadlineError::TimedOut(timeout) => {
                            anyhow!("step `{}`: {timeout}", step.name)
                        }
                        DeadlineError::Failed(err) => err,
                    }),
                None => simulate(&step).await,
            };

            let elapsed = context.started.elapsed().as_millis();
            match &outcome {
                Ok(()) => tracing::info!(step = %step.name, elapsed_ms = elapsed, "Step finished"),
                Err(err) => {
                    tracing::info!(
                        step = %step.name,
                        elapsed_ms = elapsed,
                        error = %err,
                        "Step failed"
                    );
                }
            }
            println!(
                "{elapsed:>7}ms  {:<4}  {}",
                if outcome.is_ok() { "ok" } else { "FAIL" },
                step.name
            );
            outcome
        })
    })
}

async fn simulate(step: &PlanStep) -> Result<()> {
    delay_ms(step.delay_ms).await;
    if step.fail {
        bail!("step `{}` reported failure", step.name);
    }
    Ok(())
}
