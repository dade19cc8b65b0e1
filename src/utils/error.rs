use crate::exec::ExecError;
use crate::utils::dialog;
use thiserror::Error;

pub const DIALOG_TITLE: &str = "JXTA launcher";

#[derive(Debug, Error)]
pub enum LaunchError {
	#[error("Error finding Java, aborting")]
	RuntimeNotFound { path: String },

	#[error(
		"Sorry, cannot locate {} \nDid you run this program from the correct directory?",
		quoted_list(.markers)
	)]
	InstallNotFound { markers: Vec<String> },

	#[error("Configuration error: {0:#}")]
	Config(anyhow::Error),

	#[error(transparent)]
	Exec(#[from] ExecError),
}

impl LaunchError {
	pub fn exit_code(&self) -> i32 {
		match self {
			LaunchError::Exec(e) => e.code(),
			_ => 1,
		}
	}

	/// Shows the error on its user-facing channel.
	pub fn report(&self) {
		match self {
			LaunchError::InstallNotFound { .. } => dialog::show_error(DIALOG_TITLE, &self.to_string()),
			_ => eprintln!("{self}"),
		}
	}
}

fn quoted_list(markers: &[String]) -> String {
	markers
		.iter()
		.map(|m| format!("\"{m}\""))
		.collect::<Vec<_>>()
		.join(" or ")
}

pub type Result<T> = std::result::Result<T, LaunchError>;
