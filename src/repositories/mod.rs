pub mod command;
pub mod elevation;

pub use command::{CommandExecutor, ShellExecutor};
