//! CLI argument definitions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Location of the configuration file, relative to the base directory.
pub const CONFIGURATION_DIR: &str = "configuration";
pub const CONFIGURATION_FILE: &str = "app_configuration.json";

/// Refresh the Nozbe access token, then fetch every configured entity type
/// and store each collection as a timestamped JSON file.
#[derive(Parser, Debug)]
#[command(name = "nozbe")]
#[command(author, version = env!("NOZBE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Directory holding the credentials and data directories
    /// [default: the directory containing this executable]
    #[arg(long, value_name = "PATH")]
    pub base_dir: Option<PathBuf>,

    /// Configuration file
    /// [default: <BASE_DIR>/configuration/app_configuration.json]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The base directory for this run.
    pub fn base_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.base_dir {
            return Ok(dir.clone());
        }

        let exe = std::env::current_exe().context("Could not locate the running executable")?;
        let dir = exe
            .parent()
            .context("Executable path has no parent directory")?;
        Ok(dir.to_path_buf())
    }

    /// The configuration file for this run.
    pub fn config_path(&self, base_dir: &std::path::Path) -> PathBuf {
        self.config.clone().unwrap_or_else(|| {
            base_dir.join(CONFIGURATION_DIR).join(CONFIGURATION_FILE)
        })
    }
}
