pub const CLASSPATH_FLAG: &str = "-cp";

/// A `-D<key>=<value>` system property for the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JvmProperty {
	pub key: String,
	pub value: String,
}

impl JvmProperty {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}

	pub fn to_arg(&self) -> String {
		format!("-D{}={}", self.key, self.value)
	}
}

/// Everything needed to hand over to the runtime. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
	pub runtime: String,
	pub proxy: Option<JvmProperty>,
	pub overrides: Vec<JvmProperty>,
	pub classpath: String,
	pub main_class: String,
}

impl LaunchCommand {
	/// Flags following the quoted runtime path, each with a leading space.
	///
	/// The proxy value is quoted; override values are not escaped at all.
	pub fn flag_text(&self) -> String {
		let mut text = String::new();
		if let Some(proxy) = &self.proxy {
			text.push_str(&format!(" -D{}=\"{}\"", proxy.key, proxy.value));
		}
		for prop in &self.overrides {
			text.push(' ');
			text.push_str(&prop.to_arg());
		}
		text
	}

	/// Runtime path in quotes so embedded spaces survive, then the flags.
	pub fn command_line(&self) -> String {
		format!("\"{}\"{}", self.runtime, self.flag_text())
	}

	pub fn argv(&self) -> [String; 4] {
		[
			self.command_line(),
			CLASSPATH_FLAG.to_string(),
			self.classpath.clone(),
			self.main_class.clone(),
		]
	}

	/// Properties as discrete arguments, for platforms that take an argv directly.
	pub fn jvm_args(&self) -> Vec<String> {
		self.proxy
			.iter()
			.chain(self.overrides.iter())
			.map(JvmProperty::to_arg)
			.collect()
	}

	pub fn echo_line(&self) -> String {
		self.argv().join(" ")
	}
}
