//! CDP WebSocket client.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use super::error::CdpError;
use super::protocol::BrowserVersion;
use super::session::PageSession;
use super::transport::{receive_loop, Transport};

/// CDP client for browser automation.
///
/// Holds the browser-level WebSocket connection. Page sessions share it.
pub struct CdpClient {
    transport: Arc<Transport>,
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given endpoint (e.g. `http://localhost:9222`).
    ///
    /// Every command on the connection fails with [`CdpError::Timeout`] if
    /// Chrome does not answer within `command_timeout`.
    pub async fn connect(endpoint: &str, command_timeout: Duration) -> Result<Self, CdpError> {
        let version = Self::browser_version(endpoint).await?;

        debug!(
            "Connected to browser: {} (protocol {})",
            version.browser, version.protocol_version
        );

        let browser_ws_url = version.web_socket_debugger_url;
        let (ws_stream, _) = tokio_tungstenite::connect_async(&browser_ws_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (transport, ws_source, pending) = Transport::new(ws_stream, command_timeout);
        let recv_task = tokio::spawn(receive_loop(ws_source, pending));

        debug!("CDP client connected to {}", browser_ws_url);

        Ok(Self {
            transport: Arc::new(transport),
            recv_task,
        })
    }

    /// Query `/json/version` at `endpoint`.
    ///
    /// Only a success status with a DevTools version document counts; any
    /// other HTTP service on the port is reported as
    /// [`CdpError::ChromeNotAvailable`].
    pub async fn browser_version(endpoint: &str) -> Result<BrowserVersion, CdpError> {
        url::Url::parse(endpoint)?;
        let version_url = format!("{}/json/version", endpoint.trim_end_matches('/'));
        debug!("Fetching browser version from {}", version_url);

        let not_available =
            |e: reqwest::Error| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e));
        reqwest::get(&version_url)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(not_available)?
            .json::<BrowserVersion>()
            .await
            .map_err(not_available)
    }

    /// Send a browser-level CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// Open a blank tab and attach a flattened session to it.
    pub async fn create_page(&self) -> Result<PageSession, CdpError> {
        let result = self
            .call("Target.createTarget", Some(json!({"url": "about:blank"})))
            .await?;

        let target_id = result["targetId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing targetId".to_string()))?
            .to_string();

        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        debug!("Attached session {} to target {}", session_id, target_id);

        let session = PageSession::new(target_id, session_id, self.transport.clone());
        session.enable_domains().await?;

        Ok(session)
    }

    /// Close a page/target.
    pub async fn close_page(&self, target_id: &str) -> Result<(), CdpError> {
        self.call("Target.closeTarget", Some(json!({"targetId": target_id})))
            .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve_http, VERSION_JSON};

    #[tokio::test]
    async fn test_connect_rejects_invalid_endpoint() {
        let result = CdpClient::connect("localhost 9222", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(CdpError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_connect_without_chrome() {
        // Port 9 (discard) is never a DevTools endpoint.
        let result = CdpClient::connect("http://127.0.0.1:9", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(CdpError::ChromeNotAvailable(_))));
    }

    #[tokio::test]
    async fn test_browser_version_rejects_error_status() {
        let port = serve_http("404 Not Found", VERSION_JSON).await;
        let result = CdpClient::browser_version(&format!("http://127.0.0.1:{}", port)).await;
        assert!(matches!(result, Err(CdpError::ChromeNotAvailable(_))));
    }

    #[tokio::test]
    async fn test_browser_version_rejects_other_services() {
        let port = serve_http("200 OK", r#"{"status":"ok"}"#).await;
        let result = CdpClient::browser_version(&format!("http://127.0.0.1:{}", port)).await;
        assert!(matches!(result, Err(CdpError::ChromeNotAvailable(_))));
    }

    #[tokio::test]
    async fn test_browser_version_reads_devtools_document() {
        let port = serve_http("200 OK", VERSION_JSON).await;
        let version = CdpClient::browser_version(&format!("http://127.0.0.1:{}/", port))
            .await
            .unwrap();
        assert_eq!(version.browser, "Chrome/130.0.6723.58");
        assert_eq!(version.protocol_version, "1.3");
    }
}
