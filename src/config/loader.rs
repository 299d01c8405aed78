//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `blockchain.rpc_url`.
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";

/// Environment variable overriding `listener.port`.
pub const PORT_ENV_VAR: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidEnv { var: &'static str, value: String },
    EnvFile(dotenvy::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidEnv { var, value } => {
                write!(f, "Invalid value '{}' for environment variable {}", value, var)
            }
            ConfigError::EnvFile(e) => write!(f, "Env file error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a `.env` file into the process environment.
///
/// With no explicit path, `.env` is searched for from the working directory
/// upward and a missing file is not an error. Returns the file that was
/// loaded. Runs before logging is up, so the caller reports the result.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(ConfigError::EnvFile)?;
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(ConfigError::EnvFile(e)),
        },
    }
}

/// Load configuration: defaults, then the optional TOML file, then
/// process environment overrides. The result is validated.
///
/// Call [`load_env_file`] first for `.env` values to take part.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `RPC_URL` and `PORT` overrides using the given lookup.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(rpc_url) = lookup(RPC_URL_ENV_VAR) {
        config.blockchain.rpc_url = rpc_url;
    }

    if let Some(port) = lookup(PORT_ENV_VAR) {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            var: PORT_ENV_VAR,
            value: port.clone(),
        })?;
    }

    Ok(())
}
