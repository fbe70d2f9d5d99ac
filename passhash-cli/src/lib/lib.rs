pub mod command;
pub mod config;

pub use crate::command::Cli;
pub use crate::command::Command;
pub use crate::command::Outcome;
pub use crate::config::Config;
