use chrono::Local;
use std::{fs::File, io::Write, panic, path::PathBuf};

pub fn hook() {
	panic::set_hook(Box::new(|info| {
		match generate_crash_report(info) {
			Some(path) => tracing::error!("JXTA launcher crashed, report written to {}", path.display()),
			None => tracing::error!("JXTA launcher crashed: {info}"),
		}
	}));
}

fn generate_crash_report(info: &panic::PanicHookInfo) -> Option<PathBuf> {
	const VERSION: &str = env!("CARGO_PKG_VERSION_FULL");
	let formatted_time = Local::now().format("%Y_%m_%d-%H_%M_%S").to_string();
	let dir = crate::core::paths::config_dir().unwrap_or_else(|_| std::env::temp_dir());
	std::fs::create_dir_all(&dir).ok()?;
	let path = dir.join(format!("crash_report_{}.log", formatted_time));

	let mut file = File::create(&path).ok()?;
	let _ = writeln!(file, "JXTA launcher v{} crash report", VERSION);
	let _ = writeln!(file, "{}\n", formatted_time);

	if let Some(s) = info.payload().downcast_ref::<&str>() {
		let _ = writeln!(file, "Cause: {}", s);
	} else if let Some(s) = info.payload().downcast_ref::<String>() {
		let _ = writeln!(file, "Cause: {}", s);
	}
	if let Some(location) = info.location() {
		let _ = writeln!(
			file,
			"Location: {}:{}:{}\n",
			location.file(),
			location.line(),
			location.column()
		);
	}
	if let Ok(cwd) = std::env::current_dir() {
		let _ = writeln!(file, "Working directory: {}", cwd.display());
	}

	Some(path)
}
