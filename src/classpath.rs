use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// First classpath entry, always present.
pub const SENTINEL: &str = ".";

/// Separators used when rendering classpath entries and relative paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStyle {
	pub list_separator: char,
	pub dir_separator: char,
}

impl PathStyle {
	pub const WINDOWS: Self = Self {
		list_separator: ';',
		dir_separator: '\\',
	};

	pub const UNIX: Self = Self {
		list_separator: ':',
		dir_separator: '/',
	};

	pub fn native() -> Self {
		if cfg!(windows) {
			Self::WINDOWS
		} else {
			Self::UNIX
		}
	}

	/// Rewrites a backslash-separated relative path into this style.
	pub fn localize(&self, path: &str) -> String {
		path.replace('\\', &self.dir_separator.to_string())
	}

	/// Resolves a path written in this style against `base`.
	pub fn resolve(&self, base: &Path, relative: &str) -> PathBuf {
		if Path::new(relative).is_absolute() {
			return PathBuf::from(relative);
		}
		relative
			.split(self.dir_separator)
			.filter(|part| !part.is_empty())
			.fold(base.to_path_buf(), |path, part| path.join(part))
	}
}

impl Default for PathStyle {
	fn default() -> Self {
		Self::native()
	}
}

/// Lazily lists archives directly inside `dir`, rendered as `dir` + separator + file name.
///
/// A directory that is missing or cannot be opened yields nothing, the same
/// as an empty one. Order is whatever the directory listing returns.
pub fn jar_entries(
	base: &Path,
	dir: &str,
	style: PathStyle,
	extension: &str,
) -> impl Iterator<Item = String> {
	let entries = match fs::read_dir(style.resolve(base, dir)) {
		Ok(entries) => Some(entries),
		Err(e) => {
			tracing::trace!("Skipping classpath directory {dir}: {e}");
			None
		}
	};
	let prefix = format!("{dir}{}", style.dir_separator);
	let extension = extension.to_string();

	entries
		.into_iter()
		.flatten()
		.filter_map(Result::ok)
		.filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
		.filter_map(|entry| entry.file_name().into_string().ok())
		.filter(move |name| has_extension(name, &extension))
		.map(move |name| format!("{prefix}{name}"))
}

fn has_extension(name: &str, extension: &str) -> bool {
	Path::new(name)
		.extension()
		.and_then(|e| e.to_str())
		.is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Append-only classpath that starts with [`SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classpath {
	entries: Vec<String>,
	style: PathStyle,
}

impl Classpath {
	pub fn new(style: PathStyle) -> Self {
		Self {
			entries: vec![SENTINEL.to_string()],
			style,
		}
	}

	/// Appends every archive found in `dir`, returning how many were added.
	pub fn add_jars_from(&mut self, base: &Path, dir: &str, extension: &str) -> usize {
		let before = self.entries.len();
		self.entries
			.extend(jar_entries(base, dir, self.style, extension));
		let added = self.entries.len() - before;
		if added > 0 {
			tracing::debug!("Added {added} archive(s) from {dir}");
		}
		added
	}

	#[allow(dead_code)]
	pub fn entries(&self) -> &[String] {
		&self.entries
	}
}

impl fmt::Display for Classpath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let sep = self.style.list_separator.to_string();
		f.write_str(&self.entries.join(&sep))
	}
}

/// Scans `dirs` in order and returns the joined classpath.
pub fn build_classpath(base: &Path, dirs: &[String], style: PathStyle, extension: &str) -> Classpath {
	let mut classpath = Classpath::new(style);
	for dir in dirs {
		classpath.add_jars_from(base, dir, extension);
	}
	classpath
}
