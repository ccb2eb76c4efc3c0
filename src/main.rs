mod cli;
mod handlers;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use dcfetch::ConfigManager;
use std::process;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Validate CLI arguments first
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Initialize logging based on verbosity
    let verbose = args.verbose;
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let mut config_manager = ConfigManager::new(args.config.as_deref())?;
    args.apply_overrides(config_manager.config_mut());

    if !handlers::should_skip_config_validation(&args.command) {
        if let Err(e) = config_manager.validate() {
            eprintln!("Configuration validation failed: {}", e);
            eprintln!("Run 'dcfetch config validate' for details");
            process::exit(1);
        }
    }

    match args.command {
        Commands::Run { .. } => {
            handlers::handle_run(config_manager.config(), verbose).await?;
        }
        Commands::Resolve { ref urls, .. } => {
            handlers::handle_resolve(config_manager.config(), urls).await?;
        }
        Commands::Config { action } => {
            handlers::handle_config(&config_manager, action)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn init_test_logging() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::DEBUG)
                .with_test_writer()
                .init();
        });
    }

    #[test]
    fn test_cli_overrides_reach_config_manager() {
        init_test_logging();

        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        ConfigManager::write_sample(&config_path, false).unwrap();

        let cli = Cli::try_parse_from([
            "dcfetch",
            "--config",
            config_path.to_str().unwrap(),
            "run",
            "--max-downloads",
            "3",
        ])
        .unwrap();

        let mut config_manager = ConfigManager::new(cli.config.as_deref()).unwrap();
        cli.apply_overrides(config_manager.config_mut());

        assert_eq!(config_manager.config().general.max_downloads, 3);
        assert!(config_manager.validate().is_ok());
        assert!(!handlers::should_skip_config_validation(&cli.command));
    }

    #[test]
    fn test_config_commands_skip_validation() {
        let cli = Cli::try_parse_from(["dcfetch", "config", "validate"]).unwrap();
        assert!(handlers::should_skip_config_validation(&cli.command));
    }
}
