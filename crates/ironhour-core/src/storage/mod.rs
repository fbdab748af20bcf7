//! On-device storage: data directory resolution, the SQLite key-value
//! store, and TOML configuration.

mod config;
mod database;

pub use config::{Config, DurationsConfig};
pub use database::{Database, MACHINE_KEY};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/ironhour[-dev]/`, creating it if needed.
///
/// `IRONHOUR_DATA_DIR` overrides the location entirely (tests use this to
/// stay hermetic); `IRONHOUR_ENV=dev` switches to a development directory.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = if let Ok(custom) = std::env::var("IRONHOUR_DATA_DIR") {
        PathBuf::from(custom)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("IRONHOUR_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("ironhour-dev")
        } else {
            base_dir.join("ironhour")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
