use clap::{Parser, Subcommand};
use dcfetch::{Config, Strategy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dcfetch")]
#[command(about = "Batch downloader for DocumentCloud PDFs")]
#[command(long_about = "
dcfetch reads a list of DocumentCloud document URLs, turns each into the URL of
the stored PDF and downloads it. Files already present in the output directory
are skipped, so repeated runs pick up where the last one stopped.

Examples:
  dcfetch run                                  # Use configured input/output
  dcfetch run -i urls.txt -o pdfs -m 50        # Override paths and cap
  dcfetch run --strategy redirect              # Follow redirects instead
  dcfetch resolve https://www.documentcloud.org/documents/1-a
  dcfetch config sample                        # Write a starter config
")]
#[command(version)]
pub struct Cli {
    /// Override config file path
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download every document in the URL list
    Run {
        /// File with one document URL per line
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Directory the PDFs are written to
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Stop after this many new downloads
        #[arg(short, long, value_name = "N")]
        max_downloads: Option<usize>,

        /// How document URLs are turned into PDF URLs
        #[arg(short, long, value_enum)]
        strategy: Option<Strategy>,
    },

    /// Print the PDF URL for each document URL without downloading
    Resolve {
        /// Document URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// How document URLs are turned into PDF URLs
        #[arg(short, long, value_enum)]
        strategy: Option<Strategy>,
    },

    /// Manage configuration
    #[command(visible_alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },

    /// Write a config file with default values
    Sample {
        /// Output file (defaults to the config file location)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration
    #[command(visible_alias = "check")]
    Validate,

    /// Print the config file location
    Path,
}

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum ConfigFormat {
    /// TOML format (default)
    Toml,
    /// JSON format
    Json,
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigFormat::Toml => write!(f, "toml"),
            ConfigFormat::Json => write!(f, "json"),
        }
    }
}

impl Cli {
    /// Validate CLI arguments and show helpful error messages
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Commands::Run {
                max_downloads: Some(0),
                ..
            } => {
                return Err("Max downloads must be greater than 0".to_string());
            }
            Commands::Resolve { urls, .. } => {
                if urls.iter().all(|u| u.trim().is_empty()) {
                    return Err("At least one URL is required".to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        match &self.command {
            Commands::Run {
                input,
                output_dir,
                max_downloads,
                strategy,
            } => {
                if let Some(input) = input {
                    config.general.input_file = input.clone();
                }
                if let Some(output_dir) = output_dir {
                    config.general.output_dir = output_dir.clone();
                }
                if let Some(max_downloads) = max_downloads {
                    config.general.max_downloads = *max_downloads;
                }
                if let Some(strategy) = strategy {
                    config.general.strategy = *strategy;
                }
            }
            Commands::Resolve {
                strategy: Some(strategy),
                ..
            } => {
                config.general.strategy = *strategy;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["dcfetch", "run"]).unwrap();
        assert!(matches!(cli.command, Commands::Run { .. }));
        assert!(!cli.verbose);

        let cli = Cli::try_parse_from(["dcfetch", "-v", "resolve", "https://x"]).unwrap();
        assert!(matches!(cli.command, Commands::Resolve { .. }));
        assert!(cli.verbose);

        assert!(Cli::try_parse_from(["dcfetch", "resolve"]).is_err());
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "dcfetch",
            "run",
            "--input",
            "urls.txt",
            "--output-dir",
            "pdfs",
            "--max-downloads",
            "5",
            "--strategy",
            "redirect",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.general.input_file, PathBuf::from("urls.txt"));
        assert_eq!(config.general.output_dir, PathBuf::from("pdfs"));
        assert_eq!(config.general.max_downloads, 5);
        assert_eq!(config.general.strategy, Strategy::Redirect);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::try_parse_from(["dcfetch", "run"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["dcfetch", "config", "show", "-f", "json"]).unwrap();
        if let Commands::Config { action } = cli.command {
            assert!(matches!(
                action,
                ConfigAction::Show {
                    format: ConfigFormat::Json
                }
            ));
        } else {
            panic!("Expected Config command");
        }

        let cli = Cli::try_parse_from(["dcfetch", "--config", "c.toml", "cfg", "check"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Validate
            }
        ));
    }

    #[test]
    fn test_validation() {
        let cli = Cli::try_parse_from(["dcfetch", "run"]).unwrap();
        assert!(cli.validate().is_ok());

        let cli = Cli::try_parse_from(["dcfetch", "run", "-m", "0"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["dcfetch", "resolve", " "]).unwrap();
        assert!(cli.validate().is_err());
    }
}
