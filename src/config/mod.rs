pub mod launcher;
pub mod manager;
