//! Tracing subscriber setup shared by both binaries.

use crate::config::LoggingConfig;
use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// A non-empty `RUST_LOG` is used as-is. Otherwise the configured level applies
/// to this crate, the trainer binary and the HTTP tracing layer.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(&config.level, rust_log.as_deref())?;

    let installed = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        "pretty" => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .try_init(),
        "compact" => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .try_init(),
        other => return Err(anyhow!("Unknown log format '{other}' (expected json, pretty or compact)")),
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

fn build_filter(level: &str, rust_log: Option<&str>) -> Result<EnvFilter> {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid {} '{directives}'", EnvFilter::DEFAULT_ENV));
    }

    let mut filter = EnvFilter::new("warn");
    for target in ["iris_prediction_service", "train_model", "tower_http"] {
        let directive = format!("{target}={level}")
            .parse()
            .with_context(|| format!("Invalid log level '{level}'"))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_known_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(build_filter(level, None).is_ok(), "level {level}");
        }
    }

    #[test]
    fn test_filter_rejects_garbage_level() {
        assert!(build_filter("loud", None).is_err());
    }

    #[test]
    fn test_rust_log_wins_over_configured_level() {
        let filter = build_filter("info", Some("iris_prediction_service=trace")).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("iris_prediction_service=trace"), "{rendered}");
        assert!(!rendered.contains("iris_prediction_service=info"), "{rendered}");
    }

    #[test]
    fn test_blank_rust_log_uses_configured_level() {
        let rendered = build_filter("debug", Some("  ")).unwrap().to_string();
        assert!(rendered.contains("iris_prediction_service=debug"), "{rendered}");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "xml".to_string(),
        };
        assert!(init(&config).is_err());
    }
}
