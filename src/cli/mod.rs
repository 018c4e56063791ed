pub mod commands;
pub mod output;
pub mod thread_file;

pub use commands::{Cli, run_command};
pub use output::error_message;
