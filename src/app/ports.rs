use async_trait::async_trait;

/// Fetches remote documents. The pipeline only talks to the network
/// through this trait.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// Body of a successful GET on `url`; non-2xx statuses are errors.
    async fn get(&self, url: &str) -> crate::error::Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
    /// URL after redirects; relative links resolve against it
    pub final_url: String,
}

impl HttpGetResult {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
