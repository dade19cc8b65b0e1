use std::process::Command;

fn main() {
	let version = env!("CARGO_PKG_VERSION");
	let git_hash = Command::new("git")
		.args(["rev-parse", "--short=7", "HEAD"])
		.output()
		.ok()
		.filter(|output| output.status.success())
		.map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
		.unwrap_or_else(|| "unknown".to_string());
	let full_version = format!("{}-{}", &version, &git_hash);

	println!("cargo:rustc-env=CARGO_PKG_VERSION_FULL={}", full_version);

	#[cfg(target_os = "windows")]
	{
		use winres::WindowsResource;

		WindowsResource::new()
			.set("ProductName", "JXTA Launcher")
			.set("FileDescription", "JXTA shell launcher")
			.set("ProductVersion", full_version.as_str())
			.compile()
			.expect("Failed to compile resources");
	}
}
