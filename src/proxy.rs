use crate::config::launcher::ProxySettings;
use crate::store::{read_string, ConfigStore};

/// Reads the system proxy address. Any failure means no proxy.
pub fn resolve_proxy<S: ConfigStore>(store: &S, settings: &ProxySettings) -> Option<String> {
	let key = match store.open(settings.hive, &settings.key) {
		Ok(key) => key,
		Err(e) => {
			tracing::debug!("No proxy settings key: {e}");
			return None;
		}
	};

	match read_string(&key, &settings.value) {
		Ok(proxy) => {
			tracing::debug!("Using proxy {proxy}");
			Some(proxy)
		}
		Err(e) => {
			tracing::debug!("No proxy configured: {e}");
			None
		}
	}
}
