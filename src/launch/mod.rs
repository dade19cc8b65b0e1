pub mod command;
pub mod overrides;

use crate::classpath::build_classpath;
use crate::config::launcher::LaunchSettings;
use crate::exec::ProcessReplacer;
use crate::locator::locate_runtime;
use crate::proxy::resolve_proxy;
use crate::store::ConfigStore;
use crate::utils::error::{LaunchError, Result};
use command::{JvmProperty, LaunchCommand};
use overrides::{collect_overrides, Environment};
use std::convert::Infallible;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Discover the runtime, assemble the classpath, and hand over.
pub struct Launcher<S, E, R> {
	store: S,
	env: E,
	replacer: R,
	settings: LaunchSettings,
	work_dir: PathBuf,
}

impl<S, E, R> Launcher<S, E, R>
where
	S: ConfigStore,
	E: Environment,
	R: ProcessReplacer,
{
	pub fn new(store: S, env: E, replacer: R, settings: LaunchSettings, work_dir: PathBuf) -> Self {
		Self {
			store,
			env,
			replacer,
			settings,
			work_dir,
		}
	}

	/// Runs every check and builds the command without launching it.
	pub fn prepare(&self) -> Result<LaunchCommand> {
		let style = self.settings.path_style;

		let runtime = locate_runtime(&self.store, &self.settings.runtime).unwrap_or_else(|e| {
			tracing::warn!("{e}");
			String::new()
		});
		let runtime_is_file = !runtime.is_empty()
			&& fs::metadata(style.resolve(&self.work_dir, &runtime)).is_ok_and(|m| m.is_file());
		if !runtime_is_file {
			return Err(LaunchError::RuntimeNotFound { path: runtime });
		}

		let proxy = resolve_proxy(&self.store, &self.settings.proxy)
			.map(|addr| JvmProperty::new(self.settings.proxy.property.as_str(), addr));
		let overrides = collect_overrides(&self.env, &self.settings.override_keys);

		let install_found = self
			.settings
			.markers
			.iter()
			.any(|marker| style.resolve(&self.work_dir, marker).exists());
		if !install_found {
			return Err(LaunchError::InstallNotFound {
				markers: self.settings.markers.clone(),
			});
		}

		let classpath = build_classpath(
			&self.work_dir,
			&self.settings.classpath_dirs,
			style,
			&self.settings.archive_extension,
		);

		Ok(LaunchCommand {
			runtime,
			proxy,
			overrides,
			classpath: classpath.to_string(),
			main_class: self.settings.main_class.clone(),
		})
	}

	/// Prepares, echoes the command to `out`, and replaces the process.
	pub fn run<W: Write>(&self, out: &mut W) -> Result<Infallible> {
		let command = self.prepare()?;

		if let Err(e) = writeln!(out, "{}", command.echo_line()).and_then(|_| out.flush()) {
			tracing::warn!("Failed to echo launch command: {e}");
		}
		for (i, arg) in command.argv().iter().enumerate() {
			tracing::debug!("argv[{i}] = {arg}");
		}

		Ok(self.replacer.replace(&command)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::classpath::PathStyle;
	use crate::exec::ExecError;
	use crate::store::memory::MemoryStore;
	use crate::store::Hive;
	use std::cell::RefCell;
	use std::collections::HashMap;
	use std::fs;
	use std::io;
	use std::path::Path;

	#[derive(Default)]
	struct RecordingReplacer {
		launched: RefCell<Vec<LaunchCommand>>,
	}

	impl ProcessReplacer for &RecordingReplacer {
		fn replace(&self, command: &LaunchCommand) -> std::result::Result<Infallible, ExecError> {
			self.launched.borrow_mut().push(command.clone());
			Err(ExecError {
				program: command.runtime.clone(),
				source: io::Error::from_raw_os_error(8),
			})
		}
	}

	struct Layout {
		_root: tempfile::TempDir,
		work_dir: PathBuf,
		java_home: String,
	}

	fn touch(path: &Path) {
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(path, b"").unwrap();
	}

	/// `<root>/jre` holds the runtime, `<root>/shell` is the working directory.
	fn layout(with_runtime: bool, marker: Option<&str>) -> Layout {
		let root = tempfile::tempdir().unwrap();
		let java_home = root.path().join("jre");
		if with_runtime {
			touch(&java_home.join("bin").join("java"));
		}
		let work_dir = root.path().join("shell");
		fs::create_dir_all(&work_dir).unwrap();
		if let Some(dir) = marker {
			touch(&root.path().join(dir).join("jxtashell.jar"));
		}
		Layout {
			java_home: java_home.to_string_lossy().into_owned(),
			work_dir,
			_root: root,
		}
	}

	fn settings() -> LaunchSettings {
		let mut settings = LaunchSettings::default();
		let d = std::path::MAIN_SEPARATOR;
		settings.runtime.binary_suffix = format!("{d}bin{d}java");
		settings
	}

	fn store_for(java_home: &str, proxy: Option<&str>) -> MemoryStore {
		let s = settings();
		let mut store = MemoryStore::new()
			.with_value(Hive::LocalMachine, &s.runtime.key, "CurrentVersion", "1.8")
			.with_value(
				Hive::LocalMachine,
				&format!("{}\\1.8", s.runtime.key),
				"JavaHome",
				java_home,
			);
		if let Some(proxy) = proxy {
			store = store.with_value(Hive::CurrentUser, &s.proxy.key, "ProxyServer", proxy);
		}
		store
	}

	fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[test]
	fn launches_with_proxy_overrides_and_classpath() {
		let layout = layout(true, Some("lib"));
		touch(&layout.work_dir.join("lib").join("app.jar"));
		let replacer = RecordingReplacer::default();
		let launcher = Launcher::new(
			store_for(&layout.java_home, Some("proxy.example.com:8080")),
			env(&[("JXTA_HOME", "/opt/jxta")]),
			&replacer,
			settings(),
			layout.work_dir.clone(),
		);

		let mut echoed = Vec::new();
		let err = launcher.run(&mut echoed).unwrap_err();
		assert_eq!(err.exit_code(), 8);

		let launched = replacer.launched.borrow();
		assert_eq!(launched.len(), 1);
		let cmd = &launched[0];
		assert_eq!(
			String::from_utf8(echoed).unwrap(),
			format!("{}\n", cmd.echo_line())
		);
		let style = PathStyle::native();
		let (l, d) = (style.list_separator, style.dir_separator);
		let runtime = format!("{}{d}bin{d}java", layout.java_home);

		assert_eq!(cmd.runtime, runtime);
		assert_eq!(
			cmd.command_line(),
			format!("\"{runtime}\" -Djxta.proxy=\"proxy.example.com:8080\" -DJXTA_HOME=/opt/jxta")
		);
		assert_eq!(
			cmd.classpath,
			format!(".{l}.{d}lib{d}app.jar{l}..{d}lib{d}jxtashell.jar")
		);
		assert_eq!(cmd.argv()[1], "-cp");
		assert_eq!(cmd.argv()[3], "net.jxta.impl.peergroup.Boot");
	}

	#[test]
	fn no_proxy_no_overrides() {
		let layout = layout(true, Some("dist"));
		let replacer = RecordingReplacer::default();
		let launcher = Launcher::new(
			store_for(&layout.java_home, None),
			env(&[]),
			&replacer,
			settings(),
			layout.work_dir.clone(),
		);
		let cmd = launcher.prepare().unwrap();
		assert_eq!(cmd.proxy, None);
		assert!(cmd.overrides.is_empty());
		assert_eq!(cmd.command_line(), format!("\"{}\"", cmd.runtime));
	}

	#[test]
	fn unregistered_runtime_is_fatal() {
		let layout = layout(true, Some("lib"));
		let replacer = RecordingReplacer::default();
		let store = MemoryStore::new();
		let launcher = Launcher::new(&store, env(&[]), &replacer, settings(), layout.work_dir.clone());

		let mut echoed = Vec::new();
		let err = launcher.run(&mut echoed).unwrap_err();
		assert!(matches!(err, LaunchError::RuntimeNotFound { ref path } if path.is_empty()));
		assert_eq!(err.exit_code(), 1);
		assert!(echoed.is_empty());
		assert!(replacer.launched.borrow().is_empty());
		assert_eq!(store.open_handles(), 0);
	}

	#[test]
	fn runtime_missing_on_disk_is_fatal() {
		let layout = layout(false, Some("lib"));
		let replacer = RecordingReplacer::default();
		let launcher = Launcher::new(
			store_for(&layout.java_home, None),
			env(&[]),
			&replacer,
			settings(),
			layout.work_dir.clone(),
		);

		let mut echoed = Vec::new();
		let err = launcher.run(&mut echoed).unwrap_err();
		assert!(matches!(err, LaunchError::RuntimeNotFound { ref path } if path.ends_with("java")));
		assert_eq!(err.exit_code(), 1);
		assert!(echoed.is_empty());
		assert!(replacer.launched.borrow().is_empty());
	}

	#[test]
	fn runtime_path_is_directory_is_fatal() {
		let layout = layout(false, Some("lib"));
		fs::create_dir_all(Path::new(&layout.java_home).join("bin").join("java")).unwrap();
		let replacer = RecordingReplacer::default();
		let launcher = Launcher::new(
			store_for(&layout.java_home, None),
			env(&[]),
			&replacer,
			settings(),
			layout.work_dir.clone(),
		);

		let mut echoed = Vec::new();
		let err = launcher.run(&mut echoed).unwrap_err();
		assert!(matches!(err, LaunchError::RuntimeNotFound { ref path } if path.ends_with("java")));
		assert_eq!(err.exit_code(), 1);
		assert!(echoed.is_empty());
		assert!(replacer.launched.borrow().is_empty());
	}

	#[test]
	fn missing_markers_abort_even_with_runtime() {
		let layout = layout(true, None);
		touch(&layout.work_dir.join("lib").join("jxtashell.jar"));
		let replacer = RecordingReplacer::default();
		let launcher = Launcher::new(
			store_for(&layout.java_home, Some("proxy.example.com:8080")),
			env(&[("JXTA_HOME", "/opt/jxta")]),
			&replacer,
			settings(),
			layout.work_dir.clone(),
		);

		let mut echoed = Vec::new();
		let err = launcher.run(&mut echoed).unwrap_err();
		assert!(matches!(err, LaunchError::InstallNotFound { ref markers } if markers.len() == 2));
		assert_eq!(err.exit_code(), 1);
		assert!(echoed.is_empty());
		assert!(replacer.launched.borrow().is_empty());
	}

	#[test]
	fn store_handles_released_after_launch() {
		let layout = layout(true, Some("lib"));
		let store = store_for(&layout.java_home, Some("proxy.example.com:8080"));
		let replacer = RecordingReplacer::default();
		let launcher = Launcher::new(
			&store,
			env(&[]),
			&replacer,
			settings(),
			layout.work_dir.clone(),
		);
		launcher.prepare().unwrap();
		assert_eq!(store.open_handles(), 0);
	}
}
