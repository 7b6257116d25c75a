//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::Cli;
use crate::output;
use till_core::error::AppError;
use till_database::connection::mask_password;
use till_entity::role::Role;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Validate the configuration file and environment overlay
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Validate => {
            let config = cli
                .load_config()
                .and_then(|config| {
                    config
                        .access
                        .default_role
                        .parse::<Role>()
                        .map_err(|e| AppError::configuration(format!("access.default_role: {}", e.message)))?;
                    Ok(config)
                })
                .inspect_err(|e| output::print_error(&format!("Configuration invalid: {e}")))?;

            output::print_success(&format!("Configuration '{}' is valid", cli.config));
            output::print_kv("Database", &mask_password(&config.database.url));
            output::print_kv("Cache", &config.cache.provider.to_string());
            output::print_kv("Demo mode", &output::yes_no(config.access.demo_mode));
            output::print_kv("Default role", &config.access.default_role);
            output::print_kv(
                "Primary roles",
                &format!(
                    "{}.{} by {}",
                    config.access.primary_source.table,
                    config.access.primary_source.role_column,
                    config.access.primary_source.user_column
                ),
            );
            output::print_kv(
                "Legacy roles",
                &format!(
                    "{}.{} by {}",
                    config.access.legacy_source.table,
                    config.access.legacy_source.role_column,
                    config.access.legacy_source.user_column
                ),
            );
            if config.access.demo_mode {
                output::print_warning("Demo mode shows every gated control; never enable it in production");
            }
        }
    }

    Ok(())
}
