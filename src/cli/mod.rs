//! Command-line interface: the thin platform adapter around the router

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
