//! Model Context Protocol transport: newline-delimited JSON-RPC over stdio.

pub mod messages;
pub mod server;

pub use messages::{ErrorCode, JsonRpcError, JsonRpcResponse};
pub use server::McpServer;
