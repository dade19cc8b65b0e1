use crate::classpath::PathStyle;
use crate::store::Hive;
use serde::Deserialize;
use std::path::PathBuf;

pub const JRE_KEY: &str = r"Software\JavaSoft\Java Runtime Environment";
pub const PROXY_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Internet Settings";
pub const MAIN_CLASS: &str = "net.jxta.impl.peergroup.Boot";
pub const MARKER_ARCHIVE: &str = "jxtashell.jar";
pub const OVERRIDE_KEYS: [&str; 3] = [
	"JXTA_HOME",
	"net.jxta.tls.principal",
	"net.jxta.tls.password",
];

/// Launcher settings as written in `launcher.yml`. Every field is optional.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LauncherConfig {
	pub runtime: Option<RuntimeConfig>,
	pub proxy: Option<ProxyConfig>,
	pub env_overrides: Option<Vec<String>>,
	pub markers: Option<Vec<String>>,
	pub classpath_dirs: Option<Vec<String>>,
	pub archive_extension: Option<String>,
	pub main_class: Option<String>,
	pub store_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RuntimeConfig {
	pub hive: Option<Hive>,
	pub key: Option<String>,
	pub version_value: Option<String>,
	pub home_value: Option<String>,
	pub binary_suffix: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
	pub hive: Option<Hive>,
	pub key: Option<String>,
	pub value: Option<String>,
	pub property: Option<String>,
}

impl RuntimeConfig {
	pub fn merge(&mut self, other: &Self) {
		if other.hive.is_some() {
			self.hive = other.hive;
		}
		if other.key.is_some() {
			self.key = other.key.clone();
		}
		if other.version_value.is_some() {
			self.version_value = other.version_value.clone();
		}
		if other.home_value.is_some() {
			self.home_value = other.home_value.clone();
		}
		if other.binary_suffix.is_some() {
			self.binary_suffix = other.binary_suffix.clone();
		}
	}

	fn resolve(&self) -> RuntimeSettings {
		RuntimeSettings {
			hive: self.hive.unwrap_or(Hive::LocalMachine),
			key: self.key.clone().unwrap_or_else(|| JRE_KEY.to_string()),
			version_value: self
				.version_value
				.clone()
				.unwrap_or_else(|| "CurrentVersion".to_string()),
			home_value: self
				.home_value
				.clone()
				.unwrap_or_else(|| "JavaHome".to_string()),
			binary_suffix: self
				.binary_suffix
				.clone()
				.unwrap_or_else(|| default_binary_suffix().to_string()),
		}
	}
}

impl ProxyConfig {
	pub fn merge(&mut self, other: &Self) {
		if other.hive.is_some() {
			self.hive = other.hive;
		}
		if other.key.is_some() {
			self.key = other.key.clone();
		}
		if other.value.is_some() {
			self.value = other.value.clone();
		}
		if other.property.is_some() {
			self.property = other.property.clone();
		}
	}

	fn resolve(&self) -> ProxySettings {
		ProxySettings {
			hive: self.hive.unwrap_or(Hive::CurrentUser),
			key: self.key.clone().unwrap_or_else(|| PROXY_KEY.to_string()),
			value: self
				.value
				.clone()
				.unwrap_or_else(|| "ProxyServer".to_string()),
			property: self
				.property
				.clone()
				.unwrap_or_else(|| "jxta.proxy".to_string()),
		}
	}
}

impl LauncherConfig {
	/// Layers `other` on top of `self`; fields set in `other` win.
	pub fn merge(&mut self, other: &Self) {
		if let Some(runtime) = &other.runtime {
			self.runtime
				.get_or_insert_with(RuntimeConfig::default)
				.merge(runtime);
		}
		if let Some(proxy) = &other.proxy {
			self.proxy
				.get_or_insert_with(ProxyConfig::default)
				.merge(proxy);
		}
		if other.env_overrides.is_some() {
			self.env_overrides = other.env_overrides.clone();
		}
		if other.markers.is_some() {
			self.markers = other.markers.clone();
		}
		if other.classpath_dirs.is_some() {
			self.classpath_dirs = other.classpath_dirs.clone();
		}
		if other.archive_extension.is_some() {
			self.archive_extension = other.archive_extension.clone();
		}
		if other.main_class.is_some() {
			self.main_class = other.main_class.clone();
		}
		if other.store_file.is_some() {
			self.store_file = other.store_file.clone();
		}
	}

	pub fn resolve(&self) -> LaunchSettings {
		let style = PathStyle::native();
		LaunchSettings {
			runtime: self.runtime.clone().unwrap_or_default().resolve(),
			proxy: self.proxy.clone().unwrap_or_default().resolve(),
			override_keys: self
				.env_overrides
				.clone()
				.unwrap_or_else(|| OVERRIDE_KEYS.iter().map(|k| k.to_string()).collect()),
			markers: self
				.markers
				.clone()
				.unwrap_or_else(|| default_markers(style)),
			classpath_dirs: self
				.classpath_dirs
				.clone()
				.unwrap_or_else(|| default_classpath_dirs(style)),
			archive_extension: self
				.archive_extension
				.clone()
				.unwrap_or_else(|| "jar".to_string()),
			main_class: self
				.main_class
				.clone()
				.unwrap_or_else(|| MAIN_CLASS.to_string()),
			store_file: self.store_file.clone(),
			path_style: style,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
	pub hive: Hive,
	pub key: String,
	pub version_value: String,
	pub home_value: String,
	pub binary_suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
	pub hive: Hive,
	pub key: String,
	pub value: String,
	pub property: String,
}

#[derive(Debug, Clone)]
pub struct LaunchSettings {
	pub runtime: RuntimeSettings,
	pub proxy: ProxySettings,
	pub override_keys: Vec<String>,
	pub markers: Vec<String>,
	pub classpath_dirs: Vec<String>,
	pub archive_extension: String,
	pub main_class: String,
	pub store_file: Option<PathBuf>,
	pub path_style: PathStyle,
}

impl Default for LaunchSettings {
	fn default() -> Self {
		LauncherConfig::default().resolve()
	}
}

fn default_binary_suffix() -> &'static str {
	if cfg!(windows) {
		r"\bin\javaw.exe"
	} else {
		"/bin/java"
	}
}

fn default_markers(style: PathStyle) -> Vec<String> {
	["..\\dist", "..\\lib"]
		.iter()
		.map(|dir| style.localize(&format!("{dir}\\{MARKER_ARCHIVE}")))
		.collect()
}

fn default_classpath_dirs(style: PathStyle) -> Vec<String> {
	[".", ".\\lib", ".\\dist", "..\\lib", "..\\dist"]
		.iter()
		.map(|dir| style.localize(dir))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_jxta_layout() {
		let settings = LauncherConfig::default().resolve();
		let d = settings.path_style.dir_separator;

		assert_eq!(settings.runtime.hive, Hive::LocalMachine);
		assert_eq!(settings.runtime.key, JRE_KEY);
		assert_eq!(settings.runtime.version_value, "CurrentVersion");
		assert_eq!(settings.runtime.home_value, "JavaHome");
		assert_eq!(settings.proxy.hive, Hive::CurrentUser);
		assert_eq!(settings.proxy.key, PROXY_KEY);
		assert_eq!(settings.proxy.property, "jxta.proxy");
		assert_eq!(settings.override_keys, OVERRIDE_KEYS);
		assert_eq!(settings.main_class, MAIN_CLASS);
		assert_eq!(
			settings.classpath_dirs,
			vec![
				".".to_string(),
				format!(".{d}lib"),
				format!(".{d}dist"),
				format!("..{d}lib"),
				format!("..{d}dist"),
			]
		);
		assert_eq!(
			settings.markers,
			vec![
				format!("..{d}dist{d}jxtashell.jar"),
				format!("..{d}lib{d}jxtashell.jar"),
			]
		);
	}

	#[test]
	fn every_field_reads_from_yaml() {
		let config: LauncherConfig = serde_yaml::from_str(
			r#"
runtime:
  hive: current_user
  key: Software\Example\JRE
  version_value: Version
  home_value: Home
  binary_suffix: /bin/java
proxy:
  hive: local_machine
  key: Software\Example\Net
  value: Proxy
  property: http.proxyHost
env_overrides: [JXTA_HOME]
markers: [dist/jxtashell.jar]
classpath_dirs: [lib]
archive_extension: zip
main_class: org.example.Main
store_file: /etc/jxta/store.yml
"#,
		)
		.unwrap();
		let settings = config.resolve();

		assert_eq!(
			settings.runtime,
			RuntimeSettings {
				hive: Hive::CurrentUser,
				key: r"Software\Example\JRE".to_string(),
				version_value: "Version".to_string(),
				home_value: "Home".to_string(),
				binary_suffix: "/bin/java".to_string(),
			}
		);
		assert_eq!(
			settings.proxy,
			ProxySettings {
				hive: Hive::LocalMachine,
				key: r"Software\Example\Net".to_string(),
				value: "Proxy".to_string(),
				property: "http.proxyHost".to_string(),
			}
		);
		assert_eq!(settings.override_keys, vec!["JXTA_HOME".to_string()]);
		assert_eq!(settings.markers, vec!["dist/jxtashell.jar".to_string()]);
		assert_eq!(settings.classpath_dirs, vec!["lib".to_string()]);
		assert_eq!(settings.archive_extension, "zip");
		assert_eq!(settings.main_class, "org.example.Main");
		assert_eq!(settings.store_file, Some(PathBuf::from("/etc/jxta/store.yml")));
	}

	#[test]
	fn partial_yaml_keeps_other_defaults() {
		let config: LauncherConfig = serde_yaml::from_str(
			r#"
runtime:
  binary_suffix: /bin/java
main_class: org.example.Main
"#,
		)
		.unwrap();
		let settings = config.resolve();

		assert_eq!(settings.runtime.binary_suffix, "/bin/java");
		assert_eq!(settings.runtime.key, JRE_KEY);
		assert_eq!(settings.main_class, "org.example.Main");
		assert_eq!(settings.archive_extension, "jar");
	}

	#[test]
	fn merge_prefers_later_layer() {
		let mut base: LauncherConfig = serde_yaml::from_str(
			r#"
proxy:
  property: http.proxy
  hive: local_machine
main_class: org.example.First
"#,
		)
		.unwrap();
		let top: LauncherConfig = serde_yaml::from_str(
			r#"
proxy:
  property: jxta.proxy.override
env_overrides: [JXTA_HOME]
"#,
		)
		.unwrap();
		base.merge(&top);
		let settings = base.resolve();

		assert_eq!(settings.proxy.property, "jxta.proxy.override");
		assert_eq!(settings.proxy.hive, Hive::LocalMachine);
		assert_eq!(settings.main_class, "org.example.First");
		assert_eq!(settings.override_keys, vec!["JXTA_HOME".to_string()]);
	}
}
