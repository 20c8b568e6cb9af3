use async_trait::async_trait;
use reqwest::{Request, Response};

/// Minimal HTTP transport used to download disclosure archives.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
