//! Library half of the `statkit` command line tool: data loading, run
//! configuration and the analysis commands.
pub mod commands;
pub mod input;
pub mod load_data;
