//! Finds the installed Java runtime through the configuration store.
//!
//! The store holds `<key>\CurrentVersion -> "1.8"` and
//! `<key>\1.8\JavaHome -> "C:\Program Files\Java\jre1.8"`. The runtime is
//! `JavaHome` followed by the binary suffix.

use crate::config::launcher::RuntimeSettings;
use crate::store::{read_string, ConfigStore, StoreError, StoreKey};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateError {
	#[error("Error opening registry key '{path}'")]
	OpenKey {
		path: String,
		#[source]
		source: StoreError,
	},

	#[error("Failed reading value of registry key: {path}")]
	ReadValue {
		path: String,
		#[source]
		source: StoreError,
	},
}

pub fn locate_runtime<S: ConfigStore>(
	store: &S,
	settings: &RuntimeSettings,
) -> Result<String, LocateError> {
	let key = store
		.open(settings.hive, &settings.key)
		.map_err(|source| LocateError::OpenKey {
			path: settings.key.clone(),
			source,
		})?;

	let version = read_string(&key, &settings.version_value).map_err(|source| {
		LocateError::ReadValue {
			path: format!("{}\\{}", settings.key, settings.version_value),
			source,
		}
	})?;

	let install = key
		.open_subkey(&version)
		.map_err(|source| LocateError::OpenKey {
			path: format!("{}\\{}", settings.key, version),
			source,
		})?;

	let home = read_string(&install, &settings.home_value).map_err(|source| {
		LocateError::ReadValue {
			path: format!("{}\\{}\\{}", settings.key, version, settings.home_value),
			source,
		}
	})?;

	tracing::debug!("Found Java {version} at {home}");
	Ok(format!("{home}{}", settings.binary_suffix))
}
