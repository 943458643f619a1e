//! Configuration management for ftpcp
//!
//! Values are layered: built-in defaults, then an optional `ftpcp.toml`
//! (or the file named on the command line), then `FTPCP_*` environment
//! variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::transfer::control::DEFAULT_MAX_LINE_LEN;

const DEFAULT_CONFIG_NAME: &str = "ftpcp";
const ENV_PREFIX: &str = "FTPCP";

/// Client configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Control port used when `-p` is not given
    pub default_port: u16,

    /// How long to wait for an early rejection of RETR/STOR before
    /// opening the data channel
    pub early_reply_timeout_ms: u64,

    /// How long to wait for the final reply once the data channel is done
    pub completion_timeout_ms: u64,

    /// Bound on TCP connect; unset waits for the OS
    pub connect_timeout_secs: Option<u64>,

    /// Chunk size for data channel copies
    pub buffer_size: usize,

    /// Leave `<file>.part` behind when a download fails
    pub keep_partial_downloads: bool,

    /// Longest control reply line accepted, terminator included
    pub max_line_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_port: 21,
            early_reply_timeout_ms: 2000,
            completion_timeout_ms: 10_000,
            connect_timeout_secs: None,
            buffer_size: 8192,
            keep_partial_downloads: false,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl ClientConfig {
    /// Load configuration, reading `path` if given or `./ftpcp.toml` if present
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::from(path),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        if self.early_reply_timeout_ms == 0 {
            return Err(config::ConfigError::Message(
                "early_reply_timeout_ms must be greater than 0".into(),
            ));
        }

        if self.max_line_len == 0 {
            return Err(config::ConfigError::Message(
                "max_line_len must be greater than 0".into(),
            ));
        }

        if self.connect_timeout_secs == Some(0) {
            return Err(config::ConfigError::Message(
                "connect_timeout_secs must be greater than 0 when set".into(),
            ));
        }

        Ok(())
    }

    pub fn early_reply_window(&self) -> Duration {
        Duration::from_millis(self.early_reply_timeout_ms)
    }

    pub fn completion_window(&self) -> Duration {
        Duration::from_millis(self.completion_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.default_port, 21);
        assert_eq!(config.early_reply_window(), Duration::from_secs(2));
        assert_eq!(config.connect_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "early_reply_timeout_ms = 500").unwrap();
        writeln!(file, "connect_timeout_secs = 3").unwrap();
        writeln!(file, "keep_partial_downloads = true").unwrap();

        let config = ClientConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.early_reply_window(), Duration::from_millis(500));
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(3)));
        assert!(config.keep_partial_downloads);
        assert_eq!(config.buffer_size, 8192);
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let config = ClientConfig {
            buffer_size: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            early_reply_timeout_ms: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            max_line_len: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ClientConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
