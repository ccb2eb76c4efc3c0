use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::resolver::Strategy;
use crate::resolver::pattern::{DEFAULT_STORAGE_DOMAIN, DEFAULT_STORAGE_HOST};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_max_downloads")]
    pub max_downloads: usize,
    #[serde(default)]
    pub strategy: Strategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Domain that document pages live under
    #[serde(default = "default_storage_domain")]
    pub domain: String,
    /// Host serving the PDF binaries
    #[serde(default = "default_storage_host")]
    pub host: String,
}

// Default value functions
fn default_input_file() -> PathBuf {
    PathBuf::from("extracted_urls.txt")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./NYPD_PDF/")
}
fn default_max_downloads() -> usize {
    1000
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_redirects() -> usize {
    10
}
fn default_user_agent() -> String {
    concat!("dcfetch/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_storage_domain() -> String {
    DEFAULT_STORAGE_DOMAIN.to_string()
}
fn default_storage_host() -> String {
    DEFAULT_STORAGE_HOST.to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            input_file: default_input_file(),
            output_dir: default_output_dir(),
            max_downloads: default_max_downloads(),
            strategy: Strategy::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            domain: default_storage_domain(),
            host: default_storage_host(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.general.input_file.as_os_str().is_empty() {
            bail!("input_file cannot be empty");
        }

        if self.general.output_dir.as_os_str().is_empty() {
            bail!("output_dir cannot be empty");
        }

        if self.general.max_downloads == 0 {
            bail!("max_downloads must be greater than 0");
        }

        if self.http.timeout_secs == 0 {
            bail!("timeout_secs must be greater than 0");
        }

        if self.general.strategy == Strategy::Redirect && self.http.max_redirects == 0 {
            bail!("max_redirects must be greater than 0 for the redirect strategy");
        }

        if self.storage.domain.trim().is_empty() {
            bail!("storage domain cannot be empty");
        }

        if self.storage.host.trim().is_empty() {
            bail!("storage host cannot be empty");
        }

        Ok(())
    }
}

pub struct ConfigManager {
    config_file: PathBuf,
    config: Config,
    loaded_from_file: bool,
}

impl ConfigManager {
    /// Load config from `path`, or from the default location when no path is
    /// given. Only an explicit path is required to exist.
    pub fn new(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let config_file = Self::default_config_file()?;
                if config_file.exists() {
                    Self::from_file(&config_file)
                } else {
                    Ok(Self {
                        config_file,
                        config: Config::default(),
                        loaded_from_file: false,
                    })
                }
            }
        }
    }

    /// Load config from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = Self::load_config(path)?;
        Ok(Self {
            config_file: path.to_path_buf(),
            config,
            loaded_from_file: true,
        })
    }

    /// Platform config location, e.g. `~/.config/dcfetch/config.toml`
    pub fn default_config_file() -> Result<PathBuf> {
        let project_dirs =
            ProjectDirs::from("", "", "dcfetch").context("Failed to determine config directory")?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Get a reference to the current config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a mutable reference to the current config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Get the config file path
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Whether the config came from a file or from built-in defaults
    pub fn loaded_from_file(&self) -> bool {
        self.loaded_from_file
    }

    /// Validate the current configuration
    pub fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    /// Load config from file
    fn load_config(config_file: &Path) -> Result<Config> {
        let content = fs::read_to_string(config_file)
            .with_context(|| format!("Failed to read config file: {:?}", config_file))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_file))?;

        Ok(config)
    }

    /// Write a config file with default values
    pub fn write_sample(path: &Path, overwrite: bool) -> Result<()> {
        if path.exists() && !overwrite {
            bail!("{:?} already exists (use --force to overwrite)", path);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content =
            toml::to_string_pretty(&Config::default()).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }
}
