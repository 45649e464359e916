//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and to `tower_http` request traces.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directives used when `RUST_LOG` is absent.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    format!(
        "wirsa_update={level},tower_http={level}",
        level = config.log_level
    )
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(config).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
