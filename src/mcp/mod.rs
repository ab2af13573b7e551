//! Model Context Protocol (MCP) server implementation.
//!
//! JSON-RPC 2.0 over newline-delimited stdio, per the MCP specification.
//!
//! - [`protocol`] — message types and parsing
//! - [`transport`] — stdio framing
//! - [`server`] — lifecycle, tool listing, and tool call handling

pub mod protocol;
pub mod server;
pub mod transport;
