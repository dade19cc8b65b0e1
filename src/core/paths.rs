use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn config_dir() -> Result<PathBuf> {
	dirs::config_dir()
		.context("Failed to get config directory")
		.map(|p| p.join("jxta-launcher"))
}

pub fn exe_dir() -> Result<PathBuf> {
	let exe = std::env::current_exe().context("Failed to get executable path")?;
	exe.parent()
		.map(|p| p.to_path_buf())
		.context("Executable has no parent directory")
}

/// File-backed configuration store used where there is no registry.
pub fn default_store_file() -> Result<PathBuf> {
	config_dir().map(|p| p.join("store.yml"))
}
