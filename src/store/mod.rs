//! Read-only access to the hierarchical system configuration store.
//!
//! On Windows this is the registry. Elsewhere the launcher reads the same
//! layout from a YAML file through [`memory::MemoryStore`]. Handles are
//! released when dropped, so every early return closes what it opened.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[cfg_attr(windows, allow(dead_code))]
pub mod memory;
#[cfg(windows)]
pub mod registry;

/// Longest string value accepted from the store, in characters.
///
/// Matches a `MAX_PATH` sized buffer once the terminator is accounted for.
pub const MAX_VALUE_LEN: usize = 259;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hive {
	LocalMachine,
	CurrentUser,
}

impl fmt::Display for Hive {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Hive::LocalMachine => f.write_str("HKEY_LOCAL_MACHINE"),
			Hive::CurrentUser => f.write_str("HKEY_CURRENT_USER"),
		}
	}
}

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("key not found: {0}")]
	KeyNotFound(String),

	#[error("value not found: {0}")]
	ValueNotFound(String),

	#[error("value is not a string: {0}")]
	WrongType(String),

	#[error("value {name} is {len} characters long, limit is {max}")]
	TooLong { name: String, len: usize, max: usize },

	#[error("store I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// An open handle into the store.
pub trait StoreKey: Sized {
	fn open_subkey(&self, path: &str) -> Result<Self, StoreError>;

	fn get_string(&self, name: &str) -> Result<String, StoreError>;
}

pub trait ConfigStore {
	type Key: StoreKey;

	fn open(&self, hive: Hive, path: &str) -> Result<Self::Key, StoreError>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
	type Key = T::Key;

	fn open(&self, hive: Hive, path: &str) -> Result<Self::Key, StoreError> {
		(**self).open(hive, path)
	}
}

/// Reads a string value, rejecting anything longer than [`MAX_VALUE_LEN`].
pub fn read_string<K: StoreKey>(key: &K, name: &str) -> Result<String, StoreError> {
	let value = key.get_string(name)?;
	let len = value.chars().count();
	if len > MAX_VALUE_LEN {
		return Err(StoreError::TooLong {
			name: name.to_string(),
			len,
			max: MAX_VALUE_LEN,
		});
	}
	Ok(value)
}
