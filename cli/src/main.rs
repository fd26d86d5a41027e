//! Tandem CLI - runs a step plan through the ordered pipeline.
//!
//! ```text
//! tandem [--config <path>] <plan.toml>
//! ```
//!
//! Each finished step prints its completion time relative to the start of the
//! run. The process exits non-zero if any step failed.

mod plan;

use anyhow::{Context, Result, bail};
use std::{env, io, path::PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tandem_config::TandemConfig;
use tandem_core::run_ordered;

use crate::plan::{Plan, RunContext, build_steps};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    plan: Option<PathBuf>,
}

impl Args {
    fn parse(raw: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = Self::default();
        let mut raw = raw.into_iter();
        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--config" => {
                    let path = raw.next().context("--config needs a path")?;
                    args.config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
                _ if args.plan.is_some() => bail!("only one plan file may be given"),
                _ => args.plan = Some(PathBuf::from(&arg)),
            }
        }
        Ok(args)
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<TandemConfig> {
    let config = match path {
        Some(path) => Some(TandemConfig::from_path(path)?),
        None => TandemConfig::load()?,
    };
    Ok(config.unwrap_or_default())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse(env::args().skip(1))?;
    let Some(plan_path) = args.plan else {
        bail!("usage: tandem [--config <path>] <plan.toml>");
    };

    let config = load_config(args.config.as_ref())?;
    let plan = Plan::from_path(&plan_path)?;
    let step_count = plan.steps.len();
    tracing::info!(path = %plan_path.display(), steps = step_count, "Running plan");

    let context = RunContext::new(config.network());
    let result = run_ordered(build_steps(plan, context, config.default_deadline())).await;
    let elapsed = context.started.elapsed().as_millis();

    match result {
        Ok(()) => {
            println!("{step_count} steps succeeded in {elapsed}ms");
            Ok(())
        }
        Err(err) => {
            println!("plan failed after {elapsed}ms");
            Err(err.context("plan failed"))
        }
    }
}
