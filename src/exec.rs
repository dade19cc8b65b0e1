//! Hands the process over to the runtime.
//!
//! Unix replaces the process image with `exec()`. Windows has no equivalent,
//! so the runtime is started without a console window and the launcher exits
//! with its status once it finishes.

use crate::launch::command::{LaunchCommand, CLASSPATH_FLAG};
use std::convert::Infallible;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to start {program}: {source}")]
pub struct ExecError {
	pub program: String,
	#[source]
	pub source: io::Error,
}

impl ExecError {
	/// OS error code of the failed call, or 1 when there is none.
	pub fn code(&self) -> i32 {
		self.source.raw_os_error().unwrap_or(1)
	}
}

/// Replaces the current process. Only ever returns on failure.
pub trait ProcessReplacer {
	fn replace(&self, command: &LaunchCommand) -> Result<Infallible, ExecError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemReplacer;

impl ProcessReplacer for SystemReplacer {
	#[cfg(unix)]
	fn replace(&self, command: &LaunchCommand) -> Result<Infallible, ExecError> {
		use std::os::unix::process::CommandExt;
		use std::process::Command;

		let err = Command::new(&command.runtime)
			.args(command.jvm_args())
			.arg(CLASSPATH_FLAG)
			.arg(&command.classpath)
			.arg(&command.main_class)
			.exec();

		Err(ExecError {
			program: command.runtime.clone(),
			source: err,
		})
	}

	#[cfg(windows)]
	fn replace(&self, command: &LaunchCommand) -> Result<Infallible, ExecError> {
		use std::os::windows::process::CommandExt;
		use std::process::Command;

		const CREATE_NO_WINDOW: u32 = 0x0800_0000;

		let mut cmd = Command::new(&command.runtime);
		let flags = command.flag_text();
		if !flags.is_empty() {
			cmd.raw_arg(flags.trim_start());
		}
		let status = cmd
			.arg(CLASSPATH_FLAG)
			.arg(&command.classpath)
			.arg(&command.main_class)
			.creation_flags(CREATE_NO_WINDOW)
			.status()
			.map_err(|source| ExecError {
				program: command.runtime.clone(),
				source,
			})?;

		std::process::exit(status.code().unwrap_or(1));
	}

	#[cfg(not(any(unix, windows)))]
	fn replace(&self, command: &LaunchCommand) -> Result<Infallible, ExecError> {
		Err(ExecError {
			program: command.runtime.clone(),
			source: io::Error::from(io::ErrorKind::Unsupported),
		})
	}
}
