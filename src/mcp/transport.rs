//! stdio transport for the MCP server.
//!
//! MCP's stdio transport frames messages as newline-delimited UTF-8 JSON:
//! requests arrive on stdin, responses leave on stdout, and stderr carries
//! logging only. Messages must not contain embedded newlines.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::mcp::protocol::{JsonRpcError, JsonRpcResponse};

/// Newline-delimited JSON over stdin/stdout.
pub struct StdioTransport {
    reader: BufReader<tokio::io::Stdin>,
    writer: tokio::io::Stdout,
}

impl StdioTransport {
    /// Creates a transport over the process's stdin and stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
            writer: tokio::io::stdout(),
        }
    }

    /// Reads the next message line, without its trailing newline.
    ///
    /// Returns `None` on EOF, which the server treats as client disconnect.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from stdin fails.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        Ok(Some(line))
    }

    /// Writes a success response, newline-terminated and flushed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub async fn write_response(&mut self, response: &JsonRpcResponse) -> io::Result<()> {
        let json = serde_json::to_string(response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.write_line(&json).await
    }

    /// Writes an error response, newline-terminated and flushed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub async fn write_error(&mut self, error: &JsonRpcError) -> io::Result<()> {
        let json = serde_json::to_string(error)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.write_line(&json).await
    }

    async fn write_line(&mut self, json: &str) -> io::Result<()> {
        // Framing invariant: one message per line.
        debug_assert!(!json.contains('\n'));

        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::RequestId;

    #[test]
    fn transport_default_constructs() {
        let _transport = StdioTransport::default();
    }

    #[test]
    fn responses_serialise_without_newlines() {
        let response = JsonRpcResponse::success(
            RequestId::Number(1),
            serde_json::json!({"status": "healthy", "nested": {"apps": ["solidworks"]}}),
        );
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn errors_serialise_without_newlines() {
        let error = JsonRpcError::method_not_found(RequestId::Number(1), "tools/fly");
        let json = serde_json::to_string(&error).unwrap();
        assert!(!json.contains('\n'));
    }
}
