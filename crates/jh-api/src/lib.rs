//! Transports exposing the job-history tools.
//!
//! [`McpDispatcher`] speaks MCP over JSON-RPC 2.0 and is served either on stdio
//! ([`serve_stdio`]) or, with the `http` feature, by [`HttpApi`] next to a plain REST surface.

mod error;
pub use error::ApiError;

mod handler;
pub use handler::{ToolAnnotations, ToolHandler, ToolInfo};

mod adapter;
pub use adapter::ExecutorAdapter;

pub mod schema;

mod mcp;
pub use mcp::{McpDispatcher, PROTOCOL_VERSION, RpcError, SERVER_NAME};

mod stdio;
pub use stdio::{serve_lines, serve_stdio};

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpApi;

#[cfg(feature = "http")]
pub use axum;
