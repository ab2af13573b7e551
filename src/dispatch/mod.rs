//! Tool catalog and HTTP dispatch to the desktop server.
//!
//! Every tool this server advertises (other than the local helpers in
//! [`crate::mcp`]) is a thin proxy: a name, a JSON input schema, and one HTTP
//! endpoint on the desktop automation server. Dispatch forwards the arguments
//! and returns the response body verbatim; no interpretation of the remote
//! system's domain semantics happens here.
//!
//! The catalog is static and scanned linearly; each tool name maps to exactly
//! one endpoint (enforced by tests).

mod catalog;
mod client;

pub use catalog::{endpoints, lookup, Endpoint, HttpMethod, Param, ParamKind};
pub use client::DesktopClient;

use thiserror::Error;

/// Errors that can occur while dispatching a tool call.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The tool name is not in the catalog. No request was issued.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// The unrecognised tool name.
        name: String,
    },

    /// Tool arguments were not a JSON object.
    #[error("tool '{tool}' expects a JSON object of arguments")]
    InvalidArguments {
        /// The tool being called.
        tool: String,
    },

    /// The endpoint path contains a placeholder with no matching argument.
    #[error("tool '{tool}' is missing required path parameter '{param}'")]
    MissingPathParam {
        /// The tool being called.
        tool: String,
        /// Name of the missing placeholder.
        param: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    ClientBuild {
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The request failed in transit (connection refused, timeout, DNS).
    #[error("desktop server unreachable: {source}")]
    Transport {
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The desktop server answered with a non-2xx status.
    #[error("desktop server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("desktop server returned a malformed response")]
    InvalidResponse {
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}
