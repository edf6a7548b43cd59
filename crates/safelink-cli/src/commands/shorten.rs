//! Hand a link to the URL shortener.

use clap::Args;
use serde::Serialize;

use safelink_core::config::AppConfig;
use safelink_core::error::AppError;
use safelink_core::traits::{NavigationMode, Navigator};
use safelink_service::link::{copy_with_notice, shortener_handoff_url};

use crate::output::{self, OutputFormat};
use crate::terminal::{SystemBrowser, SystemClipboard};

/// Arguments for the shorten command
#[derive(Debug, Args)]
pub struct ShortenArgs {
    /// The generated SafeLink
    pub link: String,

    /// Open the shortener page in the browser
    #[arg(long)]
    pub open: bool,

    /// Copy the link to the clipboard first
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Serialize)]
struct ShortenOutput<'a> {
    link: &'a str,
    shortener_url: String,
}

/// Execute the shorten command
pub fn execute(args: &ShortenArgs, config: AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let link = args.link.trim();
    if link.is_empty() {
        return Err(AppError::validation("Please generate a SafeLink first!"));
    }

    let shortener_url = shortener_handoff_url(&config.link.shortener_url, link);

    let copy_notice = if args.copy {
        copy_with_notice(&SystemClipboard, link)
    } else {
        None
    };

    match format {
        OutputFormat::Json => output::print_json(&ShortenOutput {
            link,
            shortener_url: shortener_url.clone(),
        }),
        OutputFormat::Table => {
            output::print_kv("Shortener", &shortener_url);
            if args.copy && copy_notice.is_none() {
                output::print_success("Link copied to clipboard");
            }
        }
    }

    if let Some(notice) = copy_notice {
        output::print_warning(&notice);
    }

    if args.open {
        SystemBrowser.navigate(&shortener_url, NavigationMode::Push)?;
        output::print_success("Shortener opened in your browser with the link pre-filled");
    }

    Ok(())
}
