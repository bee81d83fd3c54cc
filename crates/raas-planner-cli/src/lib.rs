//! RAAS planner CLI library.
//!
//! Terminal styling and snapshot formatting shared by the `raas-planner`
//! binary's subcommands.

pub mod output;
pub mod terminal;
