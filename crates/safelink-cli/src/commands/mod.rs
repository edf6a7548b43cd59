//! CLI command definitions and dispatch.

pub mod config;
pub mod decode;
pub mod generate;
pub mod open;
pub mod serve;
pub mod shorten;
pub mod validate;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use safelink_core::config::AppConfig;
use safelink_core::error::AppError;

/// SafeLink: cloaked, optionally password-protected redirect links
#[derive(Debug, Parser)]
#[command(name = "safelink", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay (loads config/<env>.toml)
    #[arg(short, long)]
    pub env: Option<String>,

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
    /// Generate a SafeLink for a destination URL
    Generate(generate::GenerateArgs),
    /// Decode a SafeLink or token and show what it points to
    Decode(decode::DecodeArgs),
    /// Check whether URLs are acceptable destinations
    Validate(validate::ValidateArgs),
    /// Walk through a SafeLink's gate in the terminal
    Open(open::OpenArgs),
    /// Hand a link to the URL shortener
    Shorten(shorten::ShortenArgs),
    /// Start the SafeLink API server
    Serve(serve::ServeArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config, self.env.as_deref())?;

        match &self.command {
            Commands::Generate(args) => generate::execute(args, config, self.format).await,
            Commands::Decode(args) => decode::execute(args, config, self.format).await,
            Commands::Validate(args) => validate::execute(args, self.format),
            Commands::Open(args) => open::execute(args, config).await,
            Commands::Shorten(args) => shorten::execute(args, config, self.format),
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Config(args) => config::execute(args, config, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(config_path: &str, env: Option<&str>) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path, env)
}

/// Helper: turn a full link, a query string, or a bare token into query pairs.
///
/// Full links and query strings (leading `?`) are searched for the
/// accepted parameter names; anything else is taken as the token itself.
pub fn extract_query_pairs(input: &str) -> Vec<(String, String)> {
    let input = input.trim();

    let query = if input.contains("://") {
        match url::Url::parse(input) {
            Ok(parsed) => parsed.query().unwrap_or_default().to_string(),
            Err(_) => return vec![("url".to_string(), input.to_string())],
        }
    } else if let Some(query) = input.strip_prefix('?') {
        query.to_string()
    } else {
        return vec![("url".to_string(), input.to_string())];
    };

    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
