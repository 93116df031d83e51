use tracing_subscriber::EnvFilter;

/// Crate targets that receive the configured log level.
const CRATE_TARGETS: &[&str] = &["platform_backend", "learning_platform_backend", "tower_http"];

/// Initialize logging for the backend binary.
///
/// `RUST_LOG` overrides `level` if set. Records emitted through the `log`
/// macros are forwarded into the subscriber.
pub fn init(level: &str) {
    let default_filter: String = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
