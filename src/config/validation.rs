//! Configuration validation.
//!
//! Semantic checks run after serde has accepted the file syntactically.
//! Returns all errors found, not just the first.

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "indexer.base_url").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("'{}' is not a valid URL", value),
        });
    }
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".to_string(),
            message: format!("'{}' is not a valid socket address", config.listener.bind_address),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.upstream_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    check_url(&mut errors, "indexer.base_url", &config.indexer.base_url);
    check_url(&mut errors, "positions.base_url", &config.positions.base_url);
    check_url(&mut errors, "swap.aggregator_url", &config.swap.aggregator_url);
    check_url(&mut errors, "blockchain.rpc_url", &config.blockchain.rpc_url);
    for (i, failover) in config.blockchain.failover_urls.iter().enumerate() {
        check_url(&mut errors, &format!("blockchain.failover_urls[{}]", i), failover);
    }

    if config.blockchain.chain_id == 0 {
        errors.push(ValidationError {
            field: "blockchain.chain_id".to_string(),
            message: "must be non-zero".to_string(),
        });
    }

    if config.blockchain.gas_price_multiplier < 1.0 {
        errors.push(ValidationError {
            field: "blockchain.gas_price_multiplier".to_string(),
            message: "must be at least 1.0".to_string(),
        });
    }

    if config.swap.quiet_period_ms == 0 {
        errors.push(ValidationError {
            field: "swap.quiet_period_ms".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
