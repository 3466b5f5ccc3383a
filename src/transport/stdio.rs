//! Stdio transport: a JSON-RPC-over-stdio loop, one request per line (§6).
//!
//! Each line on stdin is `{"jsonrpc":"2.0","id":<id>,"method":<tool
//! name>,"params":{...}}`; each response written to stdout is
//! `{"jsonrpc":"2.0","id":<id>,"result":<EnrichedResponse>}` or, for
//! malformed input, `{"jsonrpc":"2.0","id":<id|null>,"error":{"message":...}}`.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::gateway::GatewayContext;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    id: Value,
    method: String,
    #[serde(default)]
    params: Value,
}

/// Reads requests from `stdin` and writes responses to `stdout` until EOF.
pub async fn serve(ctx: Arc<GatewayContext>) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RpcRequest>(line) {
            Ok(req) => {
                debug!(method = %req.method, "dispatching tool call");
                let raw = crate::tools::dispatch(&ctx, &req.method, req.params).await;
                let result: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);
                json!({"jsonrpc": "2.0", "id": req.id, "result": result})
            }
            Err(e) => {
                warn!(error = %e, "malformed JSON-RPC request");
                json!({
                    "jsonrpc": "2.0",
                    "id": Value::Null,
                    "error": {"message": format!("invalid request: {e}")},
                })
            }
        };

        let mut encoded = serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string());
        encoded.push('\n');
        stdout.write_all(encoded.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_with_default_params() {
        let req: RpcRequest = serde_json::from_str(r#"{"id":1,"method":"get_system_metadata"}"#).unwrap();
        assert_eq!(req.method, "get_system_metadata");
        assert!(req.params.is_null());
    }
}
