//! Tracing subscriber setup.
//!
//! Request-level fields (request id, method, status, duration) are attached
//! by the trace middleware; this module only decides filtering and output
//! format. `RUST_LOG` overrides the configured level when set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Installs the global subscriber.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json_output(&config.format) {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().pretty().with_target(true)).init();
    }
}

// Anything that is not an explicit opt-out gets machine-readable output.
fn json_output(format: &str) -> bool {
    format != "pretty"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_is_the_default_output() {
        assert!(json_output("json"));
        assert!(json_output(""));
        assert!(json_output("logfmt"));
    }

    #[test]
    fn test_pretty_opts_out_of_json() {
        assert!(!json_output("pretty"));
    }
}
