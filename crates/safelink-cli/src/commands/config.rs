//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use safelink_core::config::AppConfig;
use safelink_core::error::AppError;

use crate::output::{self, OutputFormat};

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
    /// Show the effective configuration
    Show,
    /// Validate the configuration
    Validate,
    /// Write the default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config: AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(&config),
            OutputFormat::Table => {
                output::print_kv("Server", &format!("{}:{}", config.server.host, config.server.port));
                output::print_kv("Base URL", &config.link.base_url);
                output::print_kv("Landing page", &config.link.landing_page);
                output::print_kv("Default parameter", &config.link.default_param);
                output::print_kv("Shortener", &config.link.shortener_url);
                output::print_kv("Countdown", &format!("{}s", config.gate.countdown_seconds));
                output::print_kv("Accepted parameters", &config.gate.accepted_params.join(", "));
                output::print_kv(
                    "Logging",
                    &format!("{} ({})", config.logging.level, config.logging.format),
                );
            }
        },
        ConfigCommand::Validate => {
            check(&config)?;
            output::print_success(&format!("Configuration '{}' is valid", config_path));
        }
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to create dir: {}", e)))?;
            }

            tokio::fs::write(out_path, default_config)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write config: {}", e)))?;

            output::print_success(&format!("Default config written to '{}'", out_path));
        }
    }

    Ok(())
}

/// Checks values the loader cannot reject on its own.
fn check(config: &AppConfig) -> Result<(), AppError> {
    if config.link.base_url.ends_with('/') {
        return Err(AppError::configuration(
            "link.base_url must not end with '/'",
        ));
    }
    if !config.link.base_url.starts_with("http://") && !config.link.base_url.starts_with("https://")
    {
        return Err(AppError::configuration(
            "link.base_url must start with http:// or https://",
        ));
    }
    if config.link.default_param.is_empty() {
        return Err(AppError::configuration("link.default_param must not be empty"));
    }
    if config.gate.accepted_params.is_empty() {
        return Err(AppError::configuration("gate.accepted_params must not be empty"));
    }
    if !matches!(config.logging.format.as_str(), "json" | "pretty") {
        return Err(AppError::configuration(
            "logging.format must be 'json' or 'pretty'",
        ));
    }
    Ok(())
}
