use super::{ConfigStore, Hive, StoreError, StoreKey};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// A stored value. Anything that is neither a string nor a `u32` is kept as
/// `Other` so one odd entry never stops the rest of the file from loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoreValue {
	String(String),
	Dword(u32),
	Other(serde_yaml::Value),
}

impl From<&str> for StoreValue {
	fn from(value: &str) -> Self {
		StoreValue::String(value.to_string())
	}
}

impl From<String> for StoreValue {
	fn from(value: String) -> Self {
		StoreValue::String(value)
	}
}

impl From<u32> for StoreValue {
	fn from(value: u32) -> Self {
		StoreValue::Dword(value)
	}
}

/// On-disk layout: hive, then full key path, then value name.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoreFile {
	local_machine: BTreeMap<String, BTreeMap<String, StoreValue>>,
	current_user: BTreeMap<String, BTreeMap<String, StoreValue>>,
}

type Values = BTreeMap<String, StoreValue>;

/// In-memory configuration store with registry-like lookup rules.
///
/// Key paths and value names are matched without regard to ASCII case. A key
/// exists when it holds values or when any deeper key does. Every handle
/// handed out is counted until it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
	keys: Rc<HashMap<(Hive, String), Values>>,
	open: Rc<Cell<usize>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Loads a store from a YAML file. A missing file yields an empty store.
	pub fn load(path: &Path) -> Result<Self> {
		if !path.exists() {
			tracing::debug!("No store file at {}, using empty store", path.display());
			return Ok(Self::new());
		}
		let content = fs::read_to_string(path)
			.with_context(|| format!("Failed to read store file {}", path.display()))?;
		Self::from_yaml(&content)
			.with_context(|| format!("Failed to parse store file {}", path.display()))
	}

	pub fn from_yaml(content: &str) -> Result<Self> {
		let file: StoreFile = serde_yaml::from_str(content)?;
		let mut store = Self::new();
		for (hive, keys) in [
			(Hive::LocalMachine, file.local_machine),
			(Hive::CurrentUser, file.current_user),
		] {
			for (path, values) in keys {
				for (name, value) in values {
					store = store.with_value(hive, &path, &name, value);
				}
			}
		}
		Ok(store)
	}

	pub fn with_value(
		mut self,
		hive: Hive,
		path: &str,
		name: &str,
		value: impl Into<StoreValue>,
	) -> Self {
		Rc::make_mut(&mut self.keys)
			.entry((hive, normalize(path)))
			.or_default()
			.insert(name.to_ascii_lowercase(), value.into());
		self
	}

	/// Number of handles currently open against this store.
	pub fn open_handles(&self) -> usize {
		self.open.get()
	}

	fn key_exists(&self, hive: Hive, path: &str) -> bool {
		let prefix = format!("{path}\\");
		self.keys
			.keys()
			.any(|(h, p)| *h == hive && (p == path || path.is_empty() || p.starts_with(&prefix)))
	}

	fn handle(&self, hive: Hive, path: String) -> MemoryKey {
		self.open.set(self.open.get() + 1);
		MemoryKey {
			store: MemoryStore {
				keys: Rc::clone(&self.keys),
				open: Rc::clone(&self.open),
			},
			hive,
			path,
		}
	}
}

impl ConfigStore for MemoryStore {
	type Key = MemoryKey;

	fn open(&self, hive: Hive, path: &str) -> Result<MemoryKey, StoreError> {
		let path = normalize(path);
		if !self.key_exists(hive, &path) {
			return Err(StoreError::KeyNotFound(format!("{hive}\\{path}")));
		}
		Ok(self.handle(hive, path))
	}
}

#[derive(Debug)]
pub struct MemoryKey {
	store: MemoryStore,
	hive: Hive,
	path: String,
}

impl StoreKey for MemoryKey {
	fn open_subkey(&self, path: &str) -> Result<Self, StoreError> {
		let sub = normalize(path);
		let full = match (self.path.is_empty(), sub.is_empty()) {
			(_, true) => self.path.clone(),
			(true, false) => sub,
			(false, false) => format!("{}\\{}", self.path, sub),
		};
		if !self.store.key_exists(self.hive, &full) {
			return Err(StoreError::KeyNotFound(format!("{}\\{}", self.hive, full)));
		}
		Ok(self.store.handle(self.hive, full))
	}

	fn get_string(&self, name: &str) -> Result<String, StoreError> {
		let value = self
			.store
			.keys
			.get(&(self.hive, self.path.clone()))
			.and_then(|values| values.get(&name.to_ascii_lowercase()))
			.ok_or_else(|| StoreError::ValueNotFound(format!("{}\\{}", self.path, name)))?;
		match value {
			StoreValue::String(s) => Ok(s.clone()),
			StoreValue::Dword(_) | StoreValue::Other(_) => {
				Err(StoreError::WrongType(format!("{}\\{}", self.path, name)))
			}
		}
	}
}

impl Drop for MemoryKey {
	fn drop(&mut self) {
		self.store.open.set(self.store.open.get().saturating_sub(1));
	}
}

fn normalize(path: &str) -> String {
	path.replace('/', "\\")
		.split('\\')
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join("\\")
		.to_ascii_lowercase()
}
