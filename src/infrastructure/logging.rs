//! File-backed tracing setup.
//!
//! The terminal belongs to the UI, so log output goes to a file. Nothing is
//! installed unless `TCALC_LOG` holds a filter such as `debug` or
//! `tcalc=info`.

use super::persistence::PersistenceError;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "TCALC_LOG";
pub const LOG_FILE_ENV: &str = "TCALC_LOG_FILE";

fn log_path() -> PathBuf {
    if let Ok(path) = std::env::var(LOG_FILE_ENV) {
        return PathBuf::from(path);
    }
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tcalc")
        .join("tcalc.log")
}

/// Installs the global subscriber. Returns the log file path when enabled.
pub fn init_logging() -> Result<Option<PathBuf>, PersistenceError> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_FILTER_ENV) else {
        return Ok(None);
    };

    let path = log_path();
    Ok(install_file_subscriber(filter, &path)?.then_some(path))
}

/// Returns false when another global subscriber is already installed.
fn install_file_subscriber(filter: EnvFilter, path: &Path) -> Result<bool, PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
    {
        Ok(()) => Ok(true),
        Err(error) => {
            warn!(%error, path = %path.display(), "log file not attached, a subscriber is already installed");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_second_install_is_reported() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("nested").join("second.log");

        assert!(install_file_subscriber(EnvFilter::new("debug"), &first).unwrap());
        assert!(!install_file_subscriber(EnvFilter::new("debug"), &second).unwrap());
        assert!(second.exists());

        let logged = fs::read_to_string(&first).unwrap();
        assert!(logged.contains("log file not attached"));
    }
}
