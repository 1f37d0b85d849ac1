use crate::error::{ImportError, Result};
use crate::utils::constants::*;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings shared by all import jobs.
///
/// Resolved from built-in defaults, then an optional TOML file, then
/// `GEONAMES_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// GeoNames account name, required only by the continent import.
    #[serde(default)]
    pub user: Option<String>,
    pub api_url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    pub cities_input: PathBuf,
    pub cities_output: PathBuf,
    pub counties_input: PathBuf,
    pub counties_output: PathBuf,
    pub continents_output: PathBuf,
}

impl ImportConfig {
    /// Load configuration from the process environment and an optional file.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::from_sources(file, None)
    }

    /// Load configuration, reading environment overrides from `env` instead of
    /// the process environment when given.
    pub fn from_sources(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("api_url", GEONAMES_API_URL)?
            .set_default("cities_input", DEFAULT_CITIES_INPUT)?
            .set_default("cities_output", DEFAULT_CITIES_OUTPUT)?
            .set_default("counties_input", DEFAULT_COUNTIES_INPUT)?
            .set_default("counties_output", DEFAULT_COUNTIES_OUTPUT)?
            .set_default("continents_output", DEFAULT_CONTINENTS_OUTPUT)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );

        let config: ImportConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// The GeoNames account name, or a typed error naming the missing variable.
    pub fn require_user(&self) -> Result<&str> {
        match self.user.as_deref() {
            Some(user) if !user.is_empty() => Ok(user),
            _ => Err(ImportError::MissingCredential(GEONAMES_USER_VAR)),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
