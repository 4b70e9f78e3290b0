//! Subcommands of the `bizcard` binary.

pub mod batch;
pub mod cards;
pub mod config;
pub mod output;
pub mod parse;
pub mod scan;

use std::path::{Path, PathBuf};

use tracing::debug;

use bizcard_core::models::config::BizcardConfig;

/// Load settings from an explicit file, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>, db: Option<&str>) -> anyhow::Result<BizcardConfig> {
    let mut settings = match config_path {
        Some(path) => BizcardConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                debug!("Using config file {}", default_path.display());
                BizcardConfig::from_file(&default_path)?
            } else {
                BizcardConfig::default()
            }
        }
    };

    if let Some(db) = db {
        settings.storage.database_path = PathBuf::from(db);
    }

    Ok(settings)
}
