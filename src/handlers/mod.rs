pub mod config;
pub mod resolve;
pub mod run;

use crate::cli::Commands;

// Re-export all handlers
pub use config::handle_config;
pub use resolve::handle_resolve;
pub use run::handle_run;

/// Config subcommands report on the config themselves, so startup
/// validation must not get in their way
pub fn should_skip_config_validation(command: &Commands) -> bool {
    matches!(command, Commands::Config { .. })
}
