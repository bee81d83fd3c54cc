// Handlers for the CLI subcommands. main.rs parses arguments, loads the
// layer data and dispatches here.

pub mod maps;
pub mod path;
pub mod plan;
