use super::command::JvmProperty;
use std::collections::HashMap;

/// Read-only view of environment variables.
pub trait Environment {
	fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment. Unset or non-unicode variables read as absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
	fn var(&self, key: &str) -> Option<String> {
		std::env::var(key).ok()
	}
}

impl Environment for HashMap<String, String> {
	fn var(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}

/// Properties for every key that is set, in `keys` order. Values pass through verbatim.
pub fn collect_overrides<E: Environment>(env: &E, keys: &[String]) -> Vec<JvmProperty> {
	keys.iter()
		.filter_map(|key| env.var(key).map(|value| JvmProperty::new(key.as_str(), value)))
		.collect()
}
