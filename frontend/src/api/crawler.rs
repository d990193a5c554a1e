use super::ApiResult;
use crate::models::CrawlerStartRequest;
use crate::network::{json_body, ApiClient};

/// Crawler control on the primary endpoint.
#[derive(Clone)]
pub struct CrawlerApi {
    client: ApiClient,
}

impl CrawlerApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn start(&self, request: &CrawlerStartRequest) -> ApiResult {
        self.client
            .post("/api/crawler/start", Some(json_body(request)?))
            .await
    }

    pub async fn stop(&self) -> ApiResult {
        self.client.post("/api/crawler/stop", None).await
    }

    pub async fn status(&self) -> ApiResult {
        self.client.get("/api/crawler/status", Vec::new()).await
    }
}
