use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{DelegateTransport, TransportResponse};
use crate::error::DelegateError;

/// Delegate transport over HTTP. POSTs `{"query": ...}` as JSON.
///
/// Every request carries a finite timeout covering connect through the end
/// of the response body.
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    fn classify(&self, e: reqwest::Error) -> DelegateError {
        if e.is_timeout() {
            DelegateError::Timeout(self.timeout)
        } else {
            DelegateError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl DelegateTransport for HttpTransport {
    async fn post_query(&self, url: &str, query: &str) -> Result<TransportResponse, DelegateError> {
        let resp = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| self.classify(e))?;
        debug!(url, status, bytes = body.len(), "delegate responded");

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_an_error_not_a_panic() {
        // Port 9 on localhost: nothing listens, connect is refused quickly.
        let transport = HttpTransport::new(Duration::from_secs(2));
        let result = transport.post_query("http://127.0.0.1:9/ask", "hello").await;
        assert!(matches!(
            result,
            Err(DelegateError::Request(_) | DelegateError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn reads_status_and_body_from_a_live_server() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            // Drain the whole request (the JSON body ends with '}') before replying.
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"}") {
                let n = sock.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let body = "server error";
            let reply = format!(
                "HTTP/1.1 500 Internal Server Error\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            sock.write_all(reply.as_bytes()).await.unwrap();
        });

        let transport = HttpTransport::new(Duration::from_secs(5));
        let resp = transport
            .post_query(&format!("http://{addr}/ask"), "x")
            .await
            .unwrap();
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body, "server error");
    }

    #[tokio::test]
    async fn stalled_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_sock, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let transport = HttpTransport::new(Duration::from_millis(200));
        let result = transport.post_query(&format!("http://{addr}/ask"), "x").await;
        assert!(matches!(result, Err(DelegateError::Timeout(_))));
    }
}
