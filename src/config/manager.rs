use crate::config::launcher::LauncherConfig;
use crate::core::paths;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "launcher.yml";

/// Finds and layers `launcher.yml` files.
///
/// The user config directory is read first, then the directory holding the
/// executable, so an install can pin its own settings.
pub struct ConfigManager {
	search_dirs: Vec<PathBuf>,
}

impl ConfigManager {
	pub fn new() -> Self {
		let search_dirs = [paths::config_dir().ok(), paths::exe_dir().ok()]
			.into_iter()
			.flatten()
			.collect();
		Self { search_dirs }
	}

	#[allow(dead_code)]
	pub fn with_dirs(search_dirs: Vec<PathBuf>) -> Self {
		Self { search_dirs }
	}

	pub fn load_launcher_config(&self) -> Result<LauncherConfig> {
		let mut config = LauncherConfig::default();
		for dir in &self.search_dirs {
			if let Some(layer) = Self::load_file(&dir.join(CONFIG_FILE))? {
				config.merge(&layer);
			}
		}
		Ok(config)
	}

	fn load_file(config_path: &Path) -> Result<Option<LauncherConfig>> {
		if !config_path.exists() {
			return Ok(None);
		}
		let content = fs::read_to_string(config_path)
			.with_context(|| format!("Failed to read config file {}", config_path.display()))?;
		let config: LauncherConfig = serde_yaml::from_str(&content)
			.with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
		tracing::debug!("Loaded launcher config from {}", config_path.display());
		Ok(Some(config))
	}
}

impl Default for ConfigManager {
	fn default() -> Self {
		Self::new()
	}
}
