//! CLI command definitions and dispatch.

pub mod config;
pub mod modules;
pub mod permissions;
pub mod refresh;
pub mod whoami;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use till_core::config::AppConfig;
use till_core::error::AppError;
use till_service::{AccessContext, TracingNotifier};

/// Till: role visibility and cache refresh tooling
#[derive(Debug, Parser)]
#[command(name = "till", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded from config/{env}.toml
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the role → permission table
    Permissions(permissions::PermissionsArgs),
    /// Resolve the role behind an access token
    Whoami(whoami::WhoamiArgs),
    /// Invalidate cached queries after a mutation
    Refresh(refresh::RefreshArgs),
    /// Print the module → cache group table
    Modules,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Permissions(args) => permissions::execute(args, self.format),
            Commands::Whoami(args) => whoami::execute(args, self, self.format).await,
            Commands::Refresh(args) => refresh::execute(args, self, self.format).await,
            Commands::Modules => modules::execute(self.format),
            Commands::Config(args) => config::execute(args, self),
        }
    }

    /// Load configuration from the file and environment overlay.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config, &self.env)
    }

    /// Load configuration and build the access context.
    pub async fn bootstrap(&self) -> Result<AccessContext, AppError> {
        let config = self.load_config()?;
        AccessContext::bootstrap(&config, Arc::new(TracingNotifier)).await
    }
}
