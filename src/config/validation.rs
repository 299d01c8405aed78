//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check that the request timeout leaves room for a full deposit
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Longest a deposit can legitimately take: approve and supply are each one
/// send plus one confirmation wait.
pub fn deposit_budget_secs(config: &GatewayConfig) -> u64 {
    let blockchain = &config.blockchain;
    2 * (blockchain.rpc_timeout_secs + blockchain.confirmation_timeout_secs)
}

/// Validate a loaded configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::new("listener.port", "must be non-zero"));
    }

    let rpc_url = config.blockchain.rpc_url.trim();
    if rpc_url.is_empty() {
        errors.push(ValidationError::new("blockchain.rpc_url", "must be set"));
    } else if let Err(e) = rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "blockchain.rpc_url",
            format!("invalid URL '{}': {}", rpc_url, e),
        ));
    }

    if config.blockchain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("blockchain.rpc_timeout_secs", "must be > 0"));
    }
    if config.blockchain.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "blockchain.confirmation_timeout_secs",
            "must be > 0",
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    } else if config.timeouts.request_secs <= deposit_budget_secs(config) {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!(
                "must exceed the worst-case deposit time of {}s \
                 (2 x (rpc_timeout_secs + confirmation_timeout_secs))",
                deposit_budget_secs(config)
            ),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be > 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.port = 0;
        config.blockchain.rpc_url = "not a url".to_string();
        config.observability.metrics_address = "nowhere".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["listener.port", "blockchain.rpc_url", "observability.metrics_address"]
        );
    }

    #[test]
    fn test_request_timeout_must_cover_a_full_deposit() {
        let mut config = GatewayConfig::default();
        config.blockchain.rpc_timeout_secs = 10;
        config.blockchain.confirmation_timeout_secs = 120;
        assert_eq!(deposit_budget_secs(&config), 260);

        // Two confirmations alone fit, the sends do not
        config.timeouts.request_secs = 240;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "timeouts.request_secs");
        assert!(errors[0].message.contains("260s"));

        config.timeouts.request_secs = 260;
        assert!(validate_config(&config).is_err());

        config.timeouts.request_secs = 261;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_enabled = false;
        config.observability.metrics_address = String::new();
        assert!(validate_config(&config).is_ok());
    }
}
