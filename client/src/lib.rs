//! HTTP client for the product-support backend.

use serde::de::DeserializeOwned;
use shopchat_common::{
    Brand, BrandsResponse, CategoriesResponse, Category, ChatRequest, ChatResponse, HealthStatus,
    ShopChatConfig,
};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ShopClient {
    http: reqwest::Client,
    base_url: String,
}

impl ShopClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &ShopChatConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a question to `/chat` and return the reply text.
    pub async fn chat(&self, question: &str) -> Result<String> {
        let url = self.url("chat");
        tracing::debug!("POST {url}");
        let resp = self
            .http
            .post(&url)
            .json(&ChatRequest { question: question.to_string() })
            .send()
            .await?;
        let body: ChatResponse = Self::decode(resp).await?;
        tracing::debug!("reply received ({} bytes)", body.response.len());
        Ok(body.response)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.get_json("health").await
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        let body: CategoriesResponse = self.get_json("categories").await?;
        Ok(body.categories)
    }

    pub async fn brands(&self) -> Result<Vec<Brand>> {
        let body: BrandsResponse = self.get_json("brands").await?;
        Ok(body.brands)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            tracing::warn!("backend http {status}: {text}");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves exactly one request with a canned response and hands the raw
    /// request back for inspection.
    async fn serve_once(status_line: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if buf.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&buf).to_string());
        });
        (format!("http://{addr}"), rx)
    }

    fn local_client(base: String) -> ShopClient {
        ShopClient {
            http: reqwest::Client::builder().no_proxy().build().unwrap(),
            base_url: base,
        }
    }

    #[test]
    fn test_url_join() {
        let client = ShopClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("chat"), "http://localhost:8000/chat");
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
    }

    #[tokio::test]
    async fn test_chat_posts_question() {
        let (base, rx) = serve_once("200 OK", r#"{"response":"=== Products ===\n• Phone X"}"#).await;
        let client = local_client(base);

        let reply = client.chat("Do you have phones?").await.unwrap();
        assert_eq!(reply, "=== Products ===\n• Phone X");

        let request = rx.await.unwrap();
        assert!(request.starts_with("POST /chat HTTP/1.1"));
        assert!(request.contains(r#"{"question":"Do you have phones?"}"#));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base, _rx) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let client = local_client(base);

        match client.chat("hi").await {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_categories_missing_field_is_empty() {
        let (base, rx) = serve_once("200 OK", "{}").await;
        let client = local_client(base);
        assert!(client.categories().await.unwrap().is_empty());
        assert!(rx.await.unwrap().starts_with("GET /categories HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base, _rx) = serve_once("200 OK", "not json").await;
        let client = local_client(base);
        assert!(matches!(client.health().await, Err(ClientError::Decode(_))));
    }
}
