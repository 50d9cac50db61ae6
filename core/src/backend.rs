use anyhow::Result;
use async_trait::async_trait;
use shopchat_client::ShopClient;

/// Something that answers a question with a complete reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String>;
}

/// Offline backend that echoes the question back.
pub struct StubBackend;

#[async_trait]
impl ChatBackend for StubBackend {
    async fn ask(&self, question: &str) -> Result<String> {
        Ok(format!("echo: {question}"))
    }
}

/// Adapter wrapping [`ShopClient`] into [`ChatBackend`]
pub struct HttpBackend {
    inner: ShopClient,
}

impl HttpBackend {
    pub fn new(inner: ShopClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn ask(&self, question: &str) -> Result<String> {
        Ok(self.inner.chat(question).await?)
    }
}
