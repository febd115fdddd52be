//! # Structured Logging Module
//!
//! Environment-aware structured logging. Console output always goes to stderr
//! so that stdout stays free for metric output; JSON file output is added
//! when a log directory is configured.

use chrono::Utc;
use std::fs;
use std::process;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{ConfigManager, LoggingConfig};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize structured logging. Later calls are no-ops.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = ConfigManager::detect_environment();
        let directive = resolve_filter_directive(config.level.as_deref(), &environment);

        let pid = process::id();
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();

        let file_layer = config.directory.as_ref().and_then(|log_dir| {
            // Console-only logging when the directory cannot be created
            fs::create_dir_all(log_dir).ok()?;
            let file_appender = tracing_appender::rolling::never(
                log_dir,
                format!("ambari-check.{environment}.{pid}.{timestamp}.log"),
            );
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let _ = FILE_GUARD.set(guard);

            Some(
                fmt::layer()
                    .with_writer(file_writer)
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(false)
                    .json()
                    .with_filter(EnvFilter::new(&directive)),
            )
        });

        let subscriber = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_filter(EnvFilter::new(&directive)),
            )
            .with(file_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized, keeping it");
        }

        tracing::info!(
            pid = pid,
            environment = %environment,
            filter = %directive,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// RUST_LOG wins, then the configured level, then the environment default
fn resolve_filter_directive(configured: Option<&str>, environment: &str) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|directive| !directive.is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| get_log_level(environment))
}

/// Log structured data for a polling operation
pub fn log_poll_operation(
    operation: &str,
    cluster: Option<&str>,
    service: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        cluster = cluster,
        service = service,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "📡 POLL_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(get_log_level("test"), "debug");
        assert_eq!(get_log_level("development"), "debug");
        assert_eq!(get_log_level("production"), "info");
        assert_eq!(get_log_level("unknown"), "debug");
    }

    #[test]
    fn test_mixed_case_environment_gets_production_level() {
        let environment = ConfigManager::environment_from(Some("Production"), None);
        assert_eq!(get_log_level(&environment), "info");
    }

    #[test]
    fn test_configured_level_used_without_rust_log() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert_eq!(resolve_filter_directive(Some("warn"), "development"), "warn");
        assert_eq!(resolve_filter_directive(None, "production"), "info");
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        init_structured_logging(&config);
        init_structured_logging(&config);
        log_poll_operation("get_clusters", None, None, "ok", None);
    }
}
