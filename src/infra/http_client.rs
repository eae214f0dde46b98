use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::error::{FeedError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

/// `HttpClientPort` backed by a shared reqwest client.
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Fetch {
                url: url.to_string(),
                message: format!("request failed with status: {status}"),
            });
        }

        let final_url = resp.url().to_string();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = resp.bytes().await?.to_vec();
        debug!(url, status = status.as_u16(), bytes = bytes.len(), "fetched");

        Ok(HttpGetResult {
            status: status.as_u16(),
            bytes,
            content_type,
            final_url,
        })
    }
}
