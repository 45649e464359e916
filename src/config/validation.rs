//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and value ranges
//! - Detect conflicting endpoint paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: UpdateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::UpdateConfig;

/// Path of the built-in status endpoint; configured routes may not shadow it.
pub const STATUS_PATH: &str = "/status";

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "upstream.owner").
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

impl std::error::Error for ValidationError {}

/// Check every semantic constraint and collect all failures.
pub fn validate_config(config: &UpdateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    match url::Url::parse(&config.upstream.api_base_url) {
        Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
        Ok(u) => errors.push(ValidationError::new(
            "upstream.api_base_url",
            format!("unsupported scheme '{}'", u.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "upstream.api_base_url",
            format!("invalid URL: {}", e),
        )),
    }

    check_path_segment(&mut errors, "upstream.owner", &config.upstream.owner);
    check_path_segment(&mut errors, "upstream.repo", &config.upstream.repo);

    if config.upstream.user_agent.trim().is_empty() {
        errors.push(ValidationError::new("upstream.user_agent", "must not be empty"));
    }

    let filename = &config.asset.filename;
    if filename.is_empty() {
        errors.push(ValidationError::new("asset.filename", "must not be empty"));
    } else if filename
        .chars()
        .any(|c| c.is_control() || matches!(c, '"' | ';' | '/' | '\\'))
    {
        errors.push(ValidationError::new(
            "asset.filename",
            format!("'{}' contains characters not allowed in Content-Disposition", filename),
        ));
    }

    check_route(&mut errors, "routes.version_path", &config.routes.version_path);
    check_route(&mut errors, "routes.binary_path", &config.routes.binary_path);
    if config.routes.version_path == config.routes.binary_path {
        errors.push(ValidationError::new(
            "routes.binary_path",
            "must differ from routes.version_path",
        ));
    }

    for (field, value) in [
        ("timeouts.connect_secs", config.timeouts.connect_secs),
        ("timeouts.upstream_secs", config.timeouts.upstream_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ] {
        if value == Some(0) {
            errors.push(ValidationError::new(field, "must be greater than zero when set"));
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_path_segment(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    } else if value.contains('/') || value.chars().any(char::is_whitespace) {
        errors.push(ValidationError::new(
            field,
            format!("'{}' must be a single path segment", value),
        ));
    }
}

fn check_route(errors: &mut Vec<ValidationError>, field: &'static str, path: &str) {
    if !path.starts_with('/') {
        errors.push(ValidationError::new(field, format!("'{}' must start with '/'", path)));
    } else if path == STATUS_PATH {
        errors.push(ValidationError::new(
            field,
            format!("'{}' is reserved for the status endpoint", STATUS_PATH),
        ));
    } else if path.contains(['{', '}', '*'])
        || path.split('/').any(|segment| segment.starts_with(':'))
    {
        errors.push(ValidationError::new(
            field,
            format!("'{}' must be a literal path", path),
        ));
    }
}
