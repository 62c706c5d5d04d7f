//! # Logging
//!
//! Environment-aware console logging using the tracing ecosystem.
//!
//! The hydrator itself only emits `tracing` events; applications that do not
//! install their own subscriber can call [`init_console_only`] once at startup.
//!
//! Log level resolution order:
//! 1. `LOG_LEVEL`
//! 2. `RUST_LOG`
//! 3. environment default (`HYDRATOR_ENV` / `APP_ENV`): `production` -> `info`,
//!    anything else -> `debug`

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install a console subscriber once; an existing global subscriber is kept.
pub fn init_console_only() {
    TRACING_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let use_ansi = IsTerminal::is_terminal(&std::io::stdout());

        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .with_ansi(use_ansi)
            .with_filter(EnvFilter::new(&log_level));

        let subscriber = tracing_subscriber::registry().with(console_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                environment = %environment,
                log_level = %log_level,
                ansi_colors = use_ansi,
                "Console logging initialized"
            );
        }
    });
}

/// Same as [`init_console_only`] but emits JSON lines, for log shippers
pub fn init_json() {
    TRACING_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let json_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(EnvFilter::new(&log_level));

        if tracing_subscriber::registry()
            .with(json_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }
    });
}

fn get_environment() -> String {
    std::env::var("HYDRATOR_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> String {
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        return level.to_lowercase();
    }

    if let Ok(level) = std::env::var("RUST_LOG") {
        return level.to_lowercase();
    }

    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Structured hydration event with an `operation` field.
///
/// ```rust
/// use hydrator::log_hydration;
///
/// log_hydration!(debug, "fallback", type_name: "Point", unresolved: vec!["y"]);
/// log_hydration!(trace, "collection started");
/// ```
#[macro_export]
macro_rules! log_hydration {
    ($level:ident, $operation:expr, type_name: $type_name:expr, $($key:ident: $value:expr),* $(,)?) => {
        $crate::tracing::$level!(
            operation = %$operation,
            type_name = %$type_name,
            $($key = ?$value,)*
            "{} ({})", $operation, $type_name
        );
    };
    ($level:ident, $operation:expr $(,)?) => {
        $crate::tracing::$level!(
            operation = %$operation,
            "{}", $operation
        );
    };
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        $crate::tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            "{}", $operation
        );
    };
}
