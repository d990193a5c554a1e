use super::ApiResult;
use crate::models::{AnalyzeRequest, PredictRequest, ResultsQuery};
use crate::network::{json_body, query_params, ApiClient};

#[derive(Clone)]
pub struct SentimentApi {
    client: ApiClient,
}

impl SentimentApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn analyze(&self, request: &AnalyzeRequest) -> ApiResult {
        self.client
            .post("/api/sentiment/analyze", Some(json_body(request)?))
            .await
    }

    pub async fn results(&self, query: &ResultsQuery) -> ApiResult {
        self.client
            .get("/api/sentiment/results", query_params(query)?)
            .await
    }

    /// Classify a single piece of text without touching stored posts.
    pub async fn predict(&self, text: &str) -> ApiResult {
        let request = PredictRequest { text: text.to_string() };
        self.client
            .post("/api/sentiment/predict", Some(json_body(&request)?))
            .await
    }
}
