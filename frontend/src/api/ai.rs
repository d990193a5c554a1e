use super::ApiResult;
use crate::models::{AnomalyRequest, ChatRequest, ReportRequest};
use crate::network::{json_body, ApiClient};

/// AI insight endpoints. These can run for a long time on the backend; the
/// client timeout is the only bound.
#[derive(Clone)]
pub struct AiApi {
    client: ApiClient,
}

impl AiApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn generate_report(&self, request: &ReportRequest) -> ApiResult {
        self.client
            .post("/api/ai/generate-report", Some(json_body(request)?))
            .await
    }

    pub async fn detect_anomaly(&self, request: &AnomalyRequest) -> ApiResult {
        self.client
            .post("/api/ai/detect-anomaly", Some(json_body(request)?))
            .await
    }

    pub async fn chat(&self, request: &ChatRequest) -> ApiResult {
        self.client
            .post("/api/ai/chat", Some(json_body(request)?))
            .await
    }
}
