pub mod commands;
pub mod stdin;

pub use commands::{CommandService, ConsoleCommand};
pub use stdin::spawn_stdin_reader;
