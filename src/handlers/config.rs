use crate::cli::{ConfigAction, ConfigFormat};
use anyhow::{Context, Result};
use console::{Term, style};
use dcfetch::ConfigManager;
use std::process;

pub fn handle_config(config_manager: &ConfigManager, action: ConfigAction) -> Result<()> {
    let term = Term::stdout();

    match action {
        ConfigAction::Show { format } => {
            let content = match format {
                ConfigFormat::Toml => toml::to_string_pretty(config_manager.config())
                    .context("Failed to serialize config")?,
                ConfigFormat::Json => serde_json::to_string_pretty(config_manager.config())
                    .context("Failed to serialize config")?,
            };

            let source = if config_manager.loaded_from_file() {
                format!("{:?}", config_manager.config_file())
            } else {
                "built-in defaults".to_string()
            };
            term.write_line(&format!(
                "{} Current configuration ({}):",
                style("⚙️").cyan(),
                style(source).dim()
            ))?;
            term.write_line("")?;
            term.write_line(&content)?;
        }

        ConfigAction::Sample { output, force } => {
            let path = output.unwrap_or_else(|| config_manager.config_file().to_path_buf());
            ConfigManager::write_sample(&path, force)?;
            term.write_line(&format!(
                "{} Sample configuration written to {:?}",
                style("✅").green(),
                path
            ))?;
        }

        ConfigAction::Validate => match config_manager.validate() {
            Ok(()) => {
                term.write_line(&format!("{} Configuration is valid", style("✅").green()))?;
            }
            Err(e) => {
                term.write_line(&format!(
                    "{} Configuration is invalid: {}",
                    style("❌").red(),
                    e
                ))?;
                process::exit(1);
            }
        },

        ConfigAction::Path => {
            let path = config_manager.config_file();
            let status = if path.exists() {
                style("exists").green()
            } else {
                style("not created yet").yellow()
            };
            term.write_line(&format!("{} ({})", path.display(), status))?;
        }
    }

    Ok(())
}
