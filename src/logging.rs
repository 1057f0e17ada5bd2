//! Diagnostic logging setup.
//!
//! The library only emits `tracing` events. Binaries call [`initialize`] once
//! to route them to stderr; the `SEARCHVEIL_LOG` environment variable takes
//! precedence over the supplied default filter.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "SEARCHVEIL_LOG";

/// Install the stderr subscriber. Later calls keep the first subscriber.
pub fn initialize(default_filter: &str) {
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.or_else(|_| EnvFilter::try_new(default_filter))
		.unwrap_or_else(|_| EnvFilter::new("warn"));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}
