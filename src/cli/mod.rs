//! CLI module for hcloud-mcp - process surface parsed with clap.

pub mod commands;

pub use commands::Cli;
