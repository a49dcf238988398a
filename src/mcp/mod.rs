//! MCP transport - JSON-RPC 2.0 over newline-delimited stdio
//!
//! This module provides:
//! - JSON-RPC message types and error codes
//! - NdJsonCodec for line framing
//! - McpServer, which binds a tool registry to a reader/writer pair

pub mod codec;
pub mod messages;
pub mod server;

pub use codec::NdJsonCodec;
pub use messages::{
    CallToolParams, ErrorCode, JsonRpcRequest, JsonRpcResponse, Methods, RequestId, RpcError, ServerInfo,
    SUPPORTED_PROTOCOL_VERSIONS,
};
pub use server::McpServer;
