#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use crate::config::manager::ConfigManager;
use crate::exec::SystemReplacer;
use crate::launch::overrides::ProcessEnvironment;
use crate::launch::Launcher;
use crate::utils::error::LaunchError;
use anyhow::Context;
use std::convert::Infallible;
use std::io;

mod classpath;
mod config;
mod core;
mod crash_handler;
mod exec;
mod launch;
mod locator;
mod proxy;
mod store;
mod utils;

fn main() {
	crash_handler::hook();
	crate::core::logger::init();

	let code = match run() {
		Ok(never) => match never {},
		Err(e) => {
			tracing::debug!("launch failed: {e:?}");
			e.report();
			e.exit_code()
		}
	};
	std::process::exit(code);
}

fn run() -> Result<Infallible, LaunchError> {
	tracing::debug!("jxta-launcher v{} starting", env!("CARGO_PKG_VERSION_FULL"));

	let settings = ConfigManager::new()
		.load_launcher_config()
		.map_err(LaunchError::Config)?
		.resolve();
	let work_dir = std::env::current_dir()
		.context("Failed to read working directory")
		.map_err(LaunchError::Config)?;
	let store = system_store(&settings).map_err(LaunchError::Config)?;

	Launcher::new(store, ProcessEnvironment, SystemReplacer, settings, work_dir).run(&mut io::stdout())
}

#[cfg(windows)]
fn system_store(_settings: &config::launcher::LaunchSettings) -> anyhow::Result<store::registry::Registry> {
	Ok(store::registry::Registry)
}

#[cfg(not(windows))]
fn system_store(settings: &config::launcher::LaunchSettings) -> anyhow::Result<store::memory::MemoryStore> {
	match settings.store_file.clone().or_else(|| crate::core::paths::default_store_file().ok()) {
		Some(path) => store::memory::MemoryStore::load(&path),
		None => Ok(store::memory::MemoryStore::new()),
	}
}
