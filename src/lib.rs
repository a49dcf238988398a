//! hcloud-mcp - Hetzner Cloud management as MCP tools
//!
//! Exposes the Hetzner Cloud API as named, schema-validated tools over the
//! Model Context Protocol (JSON-RPC 2.0 on stdio).

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod hcloud;
pub mod logging;
pub mod mcp;
pub mod tools;

pub use error::{McpError, Result};
