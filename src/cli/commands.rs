//! Command-line definition using clap.
//!
//! The server takes no options of its own: configuration comes from the
//! environment, and stdin/stdout carry the protocol.

use clap::Parser;

/// hcloud-mcp - Hetzner Cloud tools for MCP clients over stdio
#[derive(Parser, Debug)]
#[command(name = "hcloud-mcp")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Environment:\n  HCLOUD_TOKEN     Hetzner Cloud API token (required)\n  HCLOUD_ENDPOINT  API base URL override\n  RUST_LOG         Log filter, e.g. debug")]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        assert!(Cli::try_parse_from(["hcloud-mcp"]).is_ok());
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["hcloud-mcp", "--port", "8080"]).is_err());
    }

    #[test]
    fn test_cli_version_and_help() {
        let err = Cli::try_parse_from(["hcloud-mcp", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

        let err = Cli::try_parse_from(["hcloud-mcp", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
