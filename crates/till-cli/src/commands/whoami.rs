//! Resolve the role behind an access token.

use clap::Args;
use serde::Serialize;

use crate::Cli;
use crate::output::{self, OutputFormat};
use till_auth::AccessSnapshot;
use till_core::error::AppError;
use till_entity::session::Session;

/// Arguments for the whoami command
#[derive(Debug, Args)]
pub struct WhoamiArgs {
    /// Access token (JWT) of the user to resolve
    #[arg(short, long)]
    pub token: String,
}

/// What the resolved session looks like to the UI
#[derive(Debug, Serialize)]
struct WhoamiView {
    user_id: Option<String>,
    role: Option<String>,
    source: String,
    bypass: bool,
    permissions: Vec<&'static str>,
}

impl WhoamiView {
    fn from_snapshot(snapshot: &AccessSnapshot) -> Self {
        let source = match snapshot.session() {
            Some(Session::User(user)) => format!("{:?}", user.origin).to_lowercase(),
            Some(Session::Demo(demo)) => format!("demo ({})", demo.label()),
            Some(Session::Anonymous) | None => "none".to_string(),
        };
        Self {
            user_id: snapshot
                .session()
                .and_then(Session::user_id)
                .map(|id| id.to_string()),
            role: snapshot.role().map(|r| r.to_string()),
            source,
            bypass: snapshot.is_bypass(),
            permissions: snapshot.permissions().iter().map(|p| p.as_str()).collect(),
        }
    }
}

/// Execute the whoami command
pub async fn execute(args: &WhoamiArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    let context = cli.bootstrap().await?;
    context.sign_in(args.token.as_str()).await;
    let view = WhoamiView::from_snapshot(&context.session().snapshot());
    context.shutdown().await;

    match format {
        OutputFormat::Json => output::print_json(&view, "{}"),
        OutputFormat::Table => {
            if view.user_id.is_none() && !view.bypass {
                output::print_warning("Token rejected; resolved as signed out");
            }
            output::print_kv("User", view.user_id.as_deref().unwrap_or("-"));
            output::print_kv("Role", view.role.as_deref().unwrap_or("-"));
            output::print_kv("Source", &view.source);
            output::print_kv("Bypass", &output::yes_no(view.bypass));
            output::print_kv("Permissions", &view.permissions.join(", "));
        }
    }

    Ok(())
}
