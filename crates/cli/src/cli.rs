//! Command line definition.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Deploys a built static site to an S3 website bucket.
#[derive(Debug, Parser)]
#[command(name = "siteship", version, about)]
pub struct Cli {
    /// Path to the site configuration file.
    #[arg(long, global = true, default_value = "siteship.yml")]
    pub config: PathBuf,

    /// Region override; defaults to the environment's region chain.
    #[arg(long, global = true)]
    pub region: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Provision and configure the bucket, then upload the site.
    Deploy(DeployArgs),
    /// Empty and delete the bucket.
    Remove,
}

/// Step switches for `deploy`. Every step is on unless negated.
#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Keep existing bucket contents instead of emptying before upload.
    #[arg(long = "no-delete-contents", action = ArgAction::SetFalse)]
    pub delete_contents: bool,

    /// Skip applying the website hosting configuration.
    #[arg(long = "no-config-change", action = ArgAction::SetFalse)]
    pub config_change: bool,

    /// Skip applying the bucket access policy.
    #[arg(long = "no-policy-change", action = ArgAction::SetFalse)]
    pub policy_change: bool,

    /// Skip applying the CORS rules.
    #[arg(long = "no-cors-change", action = ArgAction::SetFalse)]
    pub cors_change: bool,
}
