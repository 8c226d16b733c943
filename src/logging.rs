//! Logging via `tracing`, written to a file because the terminal belongs to the UI.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the configured level.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Errors that can occur while setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file or its directory could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured level is not a valid filter directive.
    #[error("invalid log filter {directive:?}: {source}")]
    Filter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("logging already initialized")]
    AlreadyInitialized,
}

/// Default log file: `<data dir>/contact-form/contact-form.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("contact-form").join("contact-form.log"))
}

/// Builds the filter: `RUST_LOG` wins, else `level`.
pub fn build_env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    parse_filter(level)
}

fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|source| LoggingError::Filter {
        directive: directive.to_string(),
        source,
    })
}

/// Installs the global subscriber, appending to the file at `path`.
///
/// Call once at startup. The file is opened before anything is installed, so
/// an error leaves no subscriber behind.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init_logging(level: &str, path: &Path) -> Result<(), LoggingError> {
    let filter = build_env_filter(level)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritable_log_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let err = init_logging("info", &blocker.join("contact-form.log")).unwrap_err();
        assert!(matches!(err, LoggingError::Io(_)), "got {err:?}");
    }

    #[test]
    fn known_levels_parse() {
        for level in ["error", "warn", "info", "debug", "trace", "contact_form=debug"] {
            assert!(parse_filter(level).is_ok(), "{level}");
        }
    }

    #[test]
    fn garbage_level_is_rejected() {
        let err = parse_filter("contact_form=loud").unwrap_err();
        assert!(matches!(err, LoggingError::Filter { .. }));
        assert!(err.to_string().contains("contact_form=loud"));
    }

    #[test]
    fn default_log_path_ends_with_app_file() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("contact-form/contact-form.log"));
        }
    }
}
