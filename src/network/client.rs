//! HTTP client wrapper - performs provider requests over reqwest

use std::future::Future;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::network::error::FetchError;
use crate::network::fetch::{QueryParams, QuoteTransport};

/// Alpha Vantage transport
#[derive(Clone)]
pub struct AlphaVantageClient {
    client: reqwest::Client,
    base_url: String,
}

impl AlphaVantageClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        AlphaVantageClient {
            client: create_client(timeout),
            base_url: base_url.into(),
        }
    }
}

impl QuoteTransport for AlphaVantageClient {
    fn get_json(
        &self,
        mut params: QueryParams,
        api_key: &str,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send {
        params.push(("apikey", api_key.to_string()));
        let request = self.client.get(&self.base_url).query(&params);

        async move {
            let start = Instant::now();
            let resp = request.send().await?;
            let status = resp.status();
            let elapsed = start.elapsed().as_millis() as u64;
            tracing::debug!(status = status.as_u16(), time_ms = elapsed, "Provider responded");

            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = resp.text().await?;
            serde_json::from_str::<Value>(&body).map_err(|e| FetchError::Decode(e.to_string()))
        }
    }
}

/// Create an HTTP client with the given timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to build HTTP client, using defaults without timeout");
            reqwest::Client::new()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::fetch::{bulk_params, fetch_quotes, FetchSettings};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one request with `status` and `body`, returning the request head
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/query", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            request
        });

        (url, handle)
    }

    fn symbols() -> Vec<String> {
        vec!["AAPL".to_string(), "MSFT".to_string()]
    }

    #[tokio::test]
    async fn test_sends_query_and_api_key() {
        let (url, server) = serve_once("200 OK", r#"{"Global Quote":{}}"#).await;
        let client = AlphaVantageClient::new(url, Duration::from_secs(5));

        let body = client.get_json(bulk_params(&symbols()), "test-key").await.unwrap();
        assert!(body.get("Global Quote").is_some());

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /query?"));
        assert!(request_line.contains("function=GLOBAL_QUOTE"));
        assert!(request_line.contains("symbols=AAPL%2CMSFT"));
        assert!(request_line.contains("apikey=test-key"));
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_status_error() {
        let (url, server) = serve_once("503 Service Unavailable", "{}").await;
        let client = AlphaVantageClient::new(url, Duration::from_secs(5));

        let err = client.get_json(bulk_params(&symbols()), "k").await.unwrap_err();
        assert_eq!(err, FetchError::Status(503));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_json_maps_to_decode_error() {
        let (url, server) = serve_once("200 OK", "<html>not json</html>").await;
        let client = AlphaVantageClient::new(url, Duration::from_secs(5));

        let err = client.get_json(bulk_params(&symbols()), "k").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_error_does_not_expose_api_key() {
        // Nothing listens on port 1
        let client = AlphaVantageClient::new("http://127.0.0.1:1/query", Duration::from_secs(2));
        let settings = FetchSettings {
            symbols: vec!["AAPL".to_string()],
            api_key: Some("SECRET123".to_string()),
            request_delay: Duration::ZERO,
        };

        let err = fetch_quotes(&client, &settings).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));

        let banner = err.to_string();
        assert!(!banner.contains("SECRET123"), "banner leaked key: {banner}");
        assert!(!banner.contains("apikey"));
    }
}
