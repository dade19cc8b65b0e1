use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries only the echoed command line.
pub fn init() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.with_thread_ids(false)
		.with_thread_names(false)
		.init();
}
