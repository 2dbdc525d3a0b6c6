mod config;
mod memory;
mod scopes;
pub mod sqlite;

pub use config::Config;
pub use memory::MemoryStore;
pub use scopes::{ScopedStorage, ACTIVE_KEY, SESSIONS_KEY, SETTINGS_KEY};
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::error::{ConfigError, CoreError, StorageError};

/// Synchronous string key-value port.
///
/// Both storage scopes are expressed through this trait; tests substitute
/// a [`MemoryStore`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Returns the data directory, creating it if needed.
///
/// `FOCUSROOM_DATA_DIR` wins when set. Otherwise `~/.config/focusroom[-dev]/`
/// based on `FOCUSROOM_ENV` (set it to `dev` for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let dir = match std::env::var_os("FOCUSROOM_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .ok_or_else(|| ConfigError::DataDir("home directory not found".into()))?
                .join(".config");
            let env = std::env::var("FOCUSROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusroom-dev")
            } else {
                base_dir.join("focusroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
