use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::handler::ToolHandler;
use crate::mcp::McpDispatcher;

/// Serve newline-delimited JSON-RPC until the reader hits EOF.
///
/// Every response is written as a single line and flushed immediately. Blank lines are ignored.
/// Bytes that are not UTF-8 are replaced, so a corrupt line gets a parse error instead of
/// stopping the loop.
pub async fn serve_lines<H, R, W>(
    dispatcher: McpDispatcher<H>,
    reader: R,
    mut writer: W,
) -> io::Result<()>
where
    H: ToolHandler,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(response) = dispatcher.handle_text(line).await else {
            continue;
        };
        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    debug!("stdin closed");
    Ok(())
}

/// Serve MCP on the process stdin/stdout. Logs must go to stderr.
pub async fn serve_stdio<H: ToolHandler>(dispatcher: McpDispatcher<H>) -> io::Result<()> {
    info!("serving MCP on stdio");
    serve_lines(dispatcher, tokio::io::stdin(), tokio::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use jh_core::ToolOutput;
    use serde_json::{Value, json};

    use super::*;
    use crate::error::ApiError;
    use crate::handler::ToolInfo;

    struct Empty;

    #[async_trait]
    impl ToolHandler for Empty {
        fn list_tools(&self) -> Vec<ToolInfo> {
            Vec::new()
        }

        async fn call_tool(&self, name: &str, _arguments: Value) -> Result<ToolOutput, ApiError> {
            Err(ApiError::ToolNotFound(name.to_string()))
        }
    }

    #[tokio::test]
    async fn answers_each_request_on_its_own_line() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
            "garbage\n",
        );
        let mut out = Vec::new();
        serve_lines(
            McpDispatcher::new(Arc::new(Empty)),
            input.as_bytes(),
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert!(lines[0]["result"]["protocolVersion"].is_string());
        assert_eq!(lines[1]["result"], json!({"tools": []}));
        assert_eq!(lines[2]["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_stop_the_loop() {
        let mut input = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n".to_vec();
        input.extend_from_slice(b"\xff\xfe{oops\n");
        input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}");

        let mut out = Vec::new();
        serve_lines(
            McpDispatcher::new(Arc::new(Empty)),
            input.as_slice(),
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["error"]["code"], -32700);
        assert_eq!(lines[2]["id"], 2);
        assert_eq!(lines[2]["result"], json!({}));
    }
}
