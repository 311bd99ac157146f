//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are
//! collected so a bad file can be fixed in one pass.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a [`RelayConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("relay.path: '{0}' must start with '/'")]
    RelativePath(String),

    #[error("relay.path: '{0}' must be a literal path (no '{{', '}}', '*' or ':'-prefixed segments)")]
    NonLiteralPath(String),

    #[error("relay.path: '{0}' collides with the /admin routes")]
    AdminCollision(String),

    #[error("{0}: must be greater than zero")]
    Zero(&'static str),
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let path = &config.relay.path;
    if !path.starts_with('/') {
        errors.push(ValidationError::RelativePath(path.clone()));
    } else if !is_literal_path(path) {
        errors.push(ValidationError::NonLiteralPath(path.clone()));
    } else if config.admin.enabled && (path == "/admin" || path.starts_with("/admin/")) {
        errors.push(ValidationError::AdminCollision(path.clone()));
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("limits.max_body_bytes"));
    }

    if config.outbound.timeout_secs == Some(0) {
        errors.push(ValidationError::Zero("outbound.timeout_secs"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// True when the router would mount `path` as a plain literal route.
fn is_literal_path(path: &str) -> bool {
    !path.contains(['{', '}', '*'])
        && path.split('/').all(|segment| !segment.starts_with(':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "localhost".into();
        config.relay.path = "curl".into();
        config.limits.max_body_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::RelativePath("curl".into())));
        assert!(errors.contains(&ValidationError::Zero("limits.max_body_bytes")));
    }

    #[test]
    fn test_rejects_non_literal_paths() {
        for bad in ["/curl/{", "/curl/{id}", "/curl}", "/files/*rest", "/curl/:id", "/*"] {
            let mut config = RelayConfig::default();
            config.relay.path = bad.into();
            assert_eq!(
                validate_config(&config).unwrap_err(),
                vec![ValidationError::NonLiteralPath(bad.into())],
                "{bad}"
            );
        }

        for good in ["/curl", "/v1/relay", "/a:b", "/relay-call_2"] {
            let mut config = RelayConfig::default();
            config.relay.path = good.into();
            assert!(validate_config(&config).is_ok(), "{good}");
        }
    }

    #[test]
    fn test_admin_collision_only_when_enabled() {
        let mut config = RelayConfig::default();
        config.relay.path = "/admin/curl".into();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::AdminCollision("/admin/curl".into())]
        );

        config.admin.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_checked_when_enabled() {
        let mut config = RelayConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
