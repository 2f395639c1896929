use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};
use toml::{Table, Value};

use crate::{constants, error::TunerError};

#[derive(Debug, Parser)]
#[command(version, about, author, long_about = None)]
pub struct CliOptions {
    /// Path to the config file (default: <config_dir>/tuner/tuner.toml).
    #[arg(short = 'c', long = "config")]
    pub config_file: Option<PathBuf>,

    /// Path to the file holding imported channels (default: <data_dir>/tuner/channels.json).
    #[arg(short = 's', long = "store")]
    pub store_file: Option<PathBuf>,

    /// Path to the log file (default: <cache_dir>/tuner.log).
    #[arg(short = 'l', long = "log")]
    pub log_file: Option<PathBuf>,

    /// Connect and download timeout in seconds (default: 10).
    #[arg(long = "timeout")]
    pub timeout: Option<u64>,

    /// Print logs to stderr (default: false).
    #[arg(long = "stderr")]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import the channels of a local playlist.
    ImportFile { path: PathBuf },
    /// Import the channels of a remote playlist (default: the saved url).
    ImportUrl { url: Option<String> },
    /// Print the channels of a local playlist as JSON without importing them.
    Parse { path: PathBuf },
    /// List imported channels.
    List,
    /// Remove the imported channel at the given position (as shown by `list`).
    Remove { index: usize },
    /// Remove all imported channels.
    Clear,
    /// Save the url used by `import-url`.
    SetUrl { url: String },
    /// Forget the saved url.
    ClearUrl,
}

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub download_copy: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Config {
    pub store_file: PathBuf,
    pub log_file: PathBuf,
    pub fetch_config: FetchConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: constants::DEFAULT_TIMEOUT,
            download_copy: None,
        }
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|config_dir| {
        config_dir
            .join(constants::DEFAULT_CONFIG_DIR)
            .join(constants::DEFAULT_CONFIG_FILE)
    })
}

/// A zero timeout would make every download fail.
fn timeout_from_secs(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(TunerError::Syntax("timeout must be at least 1 second".into()).into());
    }

    Ok(Duration::from_secs(secs))
}

impl FetchConfig {
    pub fn try_from_table(table: &Table) -> Result<Self> {
        let mut config = Self::default();
        for (key, val) in table {
            match (key.as_str(), val) {
                ("timeout", Value::Integer(secs)) => {
                    config.timeout = timeout_from_secs(u64::try_from(*secs)?)?;
                }
                ("download_copy", Value::String(path)) => {
                    config.download_copy = Some(PathBuf::from(path));
                }
                _ => (),
            }
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_file: dirs::data_dir()
                .unwrap_or(".".into())
                .join(constants::DEFAULT_DATA_DIR)
                .join(constants::DEFAULT_STORE_FILE),
            log_file: dirs::cache_dir()
                .unwrap_or(".".into())
                .join(constants::DEFAULT_LOG_FILE),
            fetch_config: FetchConfig::default(),
        }
    }
}

impl Config {
    pub fn try_new(content: impl AsRef<str>) -> Result<Self> {
        let table = content.as_ref().parse::<Table>()?;
        let mut config = Self {
            fetch_config: FetchConfig::try_from_table(&table)?,
            ..Self::default()
        };
        for (key, val) in table {
            match (key.as_str(), val) {
                ("store_file", Value::String(store_file)) => {
                    config.store_file = store_file.into();
                }
                ("log_file", Value::String(log_file)) => {
                    config.log_file = log_file.into();
                }
                _ => (),
            }
        }

        Ok(config)
    }

    /// Reads `path`, or the default config file if `path` is `None`.
    /// Only an explicitly given file has to exist.
    pub fn try_from_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path, true),
            None => Self::try_from_default(default_config_file()),
        }
    }

    fn try_from_default(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::read(&path, false),
            None => {
                log::warn!("no config dir found on the system, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path, required: bool) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::try_new(content),
            Err(e) if e.kind() == ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(e) => Err(anyhow!("can't read `{}`: {}", path.to_string_lossy(), e)),
        }
    }

    pub fn merge_with_cli(self, cli_opts: &CliOptions) -> Result<Self> {
        let timeout = match cli_opts.timeout {
            Some(secs) => timeout_from_secs(secs)?,
            None => self.fetch_config.timeout,
        };
        let fetch_config = FetchConfig {
            timeout,
            download_copy: self.fetch_config.download_copy,
        };

        Ok(Self {
            store_file: cli_opts.store_file.clone().unwrap_or(self.store_file),
            log_file: cli_opts.log_file.clone().unwrap_or(self.log_file),
            fetch_config,
        })
    }
}
