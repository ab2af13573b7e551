//! desktop-cad-mcp: MCP server bridging AI assistants to a CAD desktop automation service
//!
//! This library exposes the HTTP API of an external "desktop server" — a Windows
//! service that drives SolidWorks/Inventor over COM — as a catalog of MCP tools,
//! together with the small amount of local intelligence a chat front-end needs.
//!
//! # Architecture
//!
//! The desktop server owns all CAD state and all hard engineering (COM automation,
//! geometry, validation runs against drawings). This crate is deliberately thin glue:
//!
//! - **Tool Dispatch**: a static catalog mapping tool names to HTTP endpoints;
//!   arguments are forwarded as JSON and responses returned verbatim
//! - **Agent Router**: keyword scoring that picks a chat persona and its prompt
//! - **Intent Parser**: best-effort extraction of a validation request from free text
//! - **Recipe Expander**: ordered tool-call templates for common part constructions
//!
//! # Modules
//!
//! - [`agent`] — Chat persona routing
//! - [`config`] — Configuration loading and validation
//! - [`dispatch`] — Tool catalog and HTTP dispatch to the desktop server
//! - [`error`] — Error types
//! - [`intent`] — Validation intent parsing
//! - [`mcp`] — MCP protocol implementation
//! - [`recipe`] — Recipe catalog and expansion

pub mod agent;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod intent;
pub mod mcp;
pub mod recipe;
