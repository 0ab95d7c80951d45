//! Configuration management
//!
//! Loads vault settings from an optional config file with environment
//! overrides. Every value has a built-in default, so the crate also works
//! with no config file at all (library embedding, tests).

use config::{Config, Environment, File};
use serde::Deserialize;

/// Vault configuration
#[derive(Debug, Deserialize, Clone)]
pub struct VaultConfig {
    /// Copy-buffer size for downloads and archive export, in bytes
    pub buffer_size: usize,

    /// Maximum size of a single uploaded file, in megabytes
    pub max_file_size_mb: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            buffer_size: 8192,
            max_file_size_mb: 10,
        }
    }
}

impl VaultConfig {
    /// Load configuration from `config.toml` (optional) with `FILE_VAULT_*`
    /// environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = VaultConfig::default();
        let settings = Config::builder()
            .set_default("buffer_size", defaults.buffer_size as u64)?
            .set_default("max_file_size_mb", defaults.max_file_size_mb)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("FILE_VAULT"))
            .build()?;

        let config: VaultConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size cannot be 0".into(),
            ));
        }
        if self.max_file_size_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_file_size_mb cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Upload cap in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}
