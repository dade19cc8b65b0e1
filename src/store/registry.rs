use super::{ConfigStore, Hive, StoreError, StoreKey};
use std::io;
use winreg::enums::{RegType, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ};
use winreg::types::FromRegValue;
use winreg::RegKey;

/// The Windows registry, opened read-only.
#[derive(Debug, Default, Clone, Copy)]
pub struct Registry;

impl ConfigStore for Registry {
	type Key = RegistryKey;

	fn open(&self, hive: Hive, path: &str) -> Result<RegistryKey, StoreError> {
		let root = RegKey::predef(match hive {
			Hive::LocalMachine => HKEY_LOCAL_MACHINE,
			Hive::CurrentUser => HKEY_CURRENT_USER,
		});
		let full = format!("{hive}\\{path}");
		let key = root
			.open_subkey_with_flags(path, KEY_READ)
			.map_err(|e| key_error(e, full.clone()))?;
		Ok(RegistryKey { key, path: full })
	}
}

/// Open registry key. Closed when dropped.
#[derive(Debug)]
pub struct RegistryKey {
	key: RegKey,
	path: String,
}

impl StoreKey for RegistryKey {
	fn open_subkey(&self, path: &str) -> Result<Self, StoreError> {
		let full = format!("{}\\{}", self.path, path);
		let key = self
			.key
			.open_subkey_with_flags(path, KEY_READ)
			.map_err(|e| key_error(e, full.clone()))?;
		Ok(RegistryKey { key, path: full })
	}

	fn get_string(&self, name: &str) -> Result<String, StoreError> {
		let full = format!("{}\\{}", self.path, name);
		let raw = self.key.get_raw_value(name).map_err(|e| {
			if e.kind() == io::ErrorKind::NotFound {
				StoreError::ValueNotFound(full.clone())
			} else {
				StoreError::Io(e)
			}
		})?;
		if !matches!(raw.vtype, RegType::REG_SZ) {
			return Err(StoreError::WrongType(full));
		}
		Ok(String::from_reg_value(&raw)?)
	}
}

fn key_error(err: io::Error, path: String) -> StoreError {
	if err.kind() == io::ErrorKind::NotFound {
		StoreError::KeyNotFound(path)
	} else {
		StoreError::Io(err)
	}
}
