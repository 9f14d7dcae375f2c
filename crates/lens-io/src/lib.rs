pub mod clipboard;
pub mod commands;

pub use clipboard::copy_text;
pub use commands::{CommandParseError, USAGE, parse_command, read_commands};
