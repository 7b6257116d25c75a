//! Run the post-mutation refresh by hand.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::Cli;
use crate::output::{self, OutputFormat};
use till_core::error::AppError;
use till_entity::module::ModuleName;

/// Arguments for the refresh command
#[derive(Debug, Args)]
pub struct RefreshArgs {
    /// Module whose data changed
    pub module: String,

    /// Further modules affected by the same mutation
    #[arg(long)]
    pub also: Vec<String>,

    /// Success message shown to the user
    #[arg(short, long, default_value = "Saved")]
    pub message: String,
}

/// One cache group and what happened to it
#[derive(Debug, Serialize, Tabled)]
struct GroupRow {
    /// Cache group
    group: String,
    /// Outcome
    status: String,
}

/// Execute the refresh command
pub async fn execute(args: &RefreshArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    let context = cli.bootstrap().await?;

    let primary = ModuleName::from(args.module.as_str());
    let additional: Vec<ModuleName> = args.also.iter().map(|m| ModuleName::from(m.as_str())).collect();
    let outcome = context
        .coordinator()
        .handle_success(&primary, &args.message, &additional)
        .await;
    context.shutdown().await;

    if format == OutputFormat::Json {
        output::print_json(&outcome, "{}");
        return Ok(());
    }

    let rows: Vec<GroupRow> = outcome
        .report
        .groups
        .iter()
        .map(|group| GroupRow {
            group: group.clone(),
            status: "invalidated".to_string(),
        })
        .chain(outcome.failures.iter().map(|f| GroupRow {
            group: f.group.clone(),
            status: format!("failed: {}", f.reason),
        }))
        .collect();
    output::print_list(&rows, format);

    for name in &outcome.report.unknown_modules {
        output::print_warning(&format!("Unknown module '{name}'; nothing to refresh"));
    }
    if outcome.is_complete() {
        output::print_success(&format!(
            "{} ({} cached entries removed)",
            args.message, outcome.report.keys_removed
        ));
    } else {
        output::print_warning(&format!(
            "{} cache group(s) could not be refreshed",
            outcome.failures.len()
        ));
    }

    Ok(())
}
