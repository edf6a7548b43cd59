//! Check candidate destination URLs.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use safelink_core::error::AppError;
use safelink_service::validation::check_public_http_url;

use crate::output::{self, OutputFormat};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// URLs to check
    #[arg(required = true)]
    pub urls: Vec<String>,
}

/// URL check display row
#[derive(Debug, Serialize, Tabled)]
struct ValidationRow {
    /// Candidate URL
    url: String,
    /// Accepted
    valid: bool,
    /// Reason code
    reason: String,
    /// Message
    message: String,
}

/// Execute the validate command
///
/// Fails when any URL is rejected, so scripts can rely on the exit code.
pub fn execute(args: &ValidateArgs, format: OutputFormat) -> Result<(), AppError> {
    let rows: Vec<ValidationRow> = args
        .urls
        .iter()
        .map(|url| match check_public_http_url(url) {
            Ok(_) => ValidationRow {
                url: url.clone(),
                valid: true,
                reason: String::new(),
                message: "Valid URL".to_string(),
            },
            Err(rejection) => ValidationRow {
                url: url.clone(),
                valid: false,
                reason: rejection.code().to_string(),
                message: rejection.to_string(),
            },
        })
        .collect();

    output::print_list(&rows, format);

    let rejected = rows.iter().filter(|r| !r.valid).count();
    if rejected > 0 {
        return Err(AppError::validation(format!(
            "{} of {} URLs rejected",
            rejected,
            rows.len()
        )));
    }
    Ok(())
}
