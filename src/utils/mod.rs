pub mod dialog;
pub mod error;
