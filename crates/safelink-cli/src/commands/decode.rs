//! Decode a SafeLink and show where it leads.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use safelink_auth::PasswordHasher;
use safelink_core::config::AppConfig;
use safelink_core::error::AppError;
use safelink_service::gate::token_from_query;
use safelink_service::link::LinkService;

use crate::output::{self, OutputFormat};

/// Arguments for the decode command
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Full link, query string, or bare token
    pub link: String,

    /// Password for a protected link
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Decoded link display row
#[derive(Debug, Serialize, Tabled)]
struct DecodeRow {
    /// Destination
    target: String,
    /// Password required
    password_required: bool,
    /// Decoding tier
    tier: String,
}

/// Execute the decode command
pub async fn execute(
    args: &DecodeArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pairs = super::extract_query_pairs(&args.link);
    let token = token_from_query(&config.gate.accepted_params, &pairs)
        .ok_or_else(|| AppError::validation("No encrypted URL provided. Please check your link."))?;

    let service = LinkService::new(config.link.clone(), Arc::new(PasswordHasher::new()));
    let inspection = service.inspect(token)?;

    let target = match (&inspection.target_url, &args.password) {
        (Some(url), _) => url.clone(),
        (None, Some(password)) => service.unlock(token, password).await?,
        (None, None) => "(hidden: password required)".to_string(),
    };

    let row = DecodeRow {
        target,
        password_required: inspection.password_required,
        tier: serde_json::to_value(inspection.tier)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default(),
    };

    output::print_list(&[row], format);
    Ok(())
}
