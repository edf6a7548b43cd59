//! Generate a SafeLink.

use std::sync::Arc;

use clap::Args;

use safelink_auth::PasswordHasher;
use safelink_core::config::AppConfig;
use safelink_core::error::AppError;
use safelink_service::link::{GenerateLinkRequest, LinkService, copy_with_notice};

use crate::output::{self, OutputFormat};
use crate::terminal::SystemClipboard;

/// Arguments for the generate command
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Destination URL (prompted for when omitted)
    pub url: Option<String>,

    /// Protect the link with this password
    #[arg(short, long, conflicts_with = "ask_password")]
    pub password: Option<String>,

    /// Prompt for a password without echoing it
    #[arg(long)]
    pub ask_password: bool,

    /// Query parameter name for the token
    #[arg(long)]
    pub param: Option<String>,

    /// Copy the generated link to the clipboard
    #[arg(long)]
    pub copy: bool,
}

/// Execute the generate command
pub async fn execute(
    args: &GenerateArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let url = match &args.url {
        Some(u) => u.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Destination URL")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let password = if args.ask_password {
        let p: String = dialoguer::Password::new()
            .with_prompt("Link password (leave empty for none)")
            .allow_empty_password(true)
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
        Some(p)
    } else {
        args.password.clone()
    };

    let service = LinkService::new(config.link, Arc::new(PasswordHasher::new()));
    let link = service
        .generate(GenerateLinkRequest {
            url,
            password,
            param_name: args.param.clone(),
        })
        .await?;

    let copy_notice = if args.copy {
        copy_with_notice(&SystemClipboard, &link.link)
    } else {
        None
    };

    match format {
        OutputFormat::Json => output::print_json(&link),
        OutputFormat::Table => {
            output::print_success("SafeLink generated");
            println!();
            println!("{}", link.link);
            println!();
            output::print_kv("Original length", &link.original_length.to_string());
            output::print_kv("Token length", &link.token_length.to_string());
            output::print_kv("Compression", &format!("{}%", link.compression_percent));
            output::print_kv(
                "Password",
                if link.password_protected { "yes" } else { "no" },
            );
            if args.copy && copy_notice.is_none() {
                output::print_success("Link copied to clipboard");
            }
        }
    }

    if let Some(notice) = copy_notice {
        output::print_warning(&notice);
    }

    Ok(())
}
