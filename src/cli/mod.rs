pub mod commands;
pub mod output;
pub mod report;
pub mod validate;

pub use commands::{Cli, Commands};
