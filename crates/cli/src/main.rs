//! siteship command line entry point.

mod cli;
mod prompt;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;
use siteship_config::{RunFlags, SiteConfig};
use siteship_deploy::{DeployOrchestrator, DeployOutcome};
use siteship_storage::S3SiteStore;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::prompt::StdinPrompt;

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    tracing::error!(error = %format!("{error:#}"), "command failed");
    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(&cli.config)?;
    let site_root = site_root(&cli.config, &config);

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = cli.region.clone() {
        loader = loader.region(aws_config::Region::new(region));
    }
    let sdk_config = loader.load().await;
    let region = sdk_config.region().map(|r| r.to_string());
    let store = S3SiteStore::new(aws_sdk_s3::Client::new(&sdk_config), region);
    let prompt = StdinPrompt;

    match cli.command {
        Command::Deploy(args) => {
            let flags = RunFlags {
                delete_contents: args.delete_contents,
                config_change: args.config_change,
                policy_change: args.policy_change,
                cors_change: args.cors_change,
            };
            let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, flags);
            run_outcome(orchestrator.deploy(&site_root).await?);
        }
        Command::Remove => {
            let orchestrator =
                DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());
            run_outcome(orchestrator.remove().await?);
        }
    }

    Ok(())
}

/// An operator abort is a normal exit; nothing more to say about it.
fn run_outcome(outcome: DeployOutcome) {
    if outcome == DeployOutcome::Completed {
        tracing::debug!("command completed");
    }
}

fn load_config(path: &Path) -> anyhow::Result<SiteConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file {}", path.display()))?;
    let config: SiteConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse configuration file {}", path.display()))?;
    Ok(config)
}

/// The asset directory is relative to the configuration file, so runs
/// behave the same from any working directory.
fn site_root(config_path: &Path, config: &SiteConfig) -> PathBuf {
    config_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .join(&config.dist_dir)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
