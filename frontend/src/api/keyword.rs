use super::ApiResult;
use crate::models::{KeywordExtractRequest, ResultsQuery};
use crate::network::{json_body, query_params, ApiClient};

#[derive(Clone)]
pub struct KeywordApi {
    client: ApiClient,
}

impl KeywordApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn extract(&self, request: &KeywordExtractRequest) -> ApiResult {
        self.client
            .post("/api/keyword/extract", Some(json_body(request)?))
            .await
    }

    pub async fn results(&self, query: &ResultsQuery) -> ApiResult {
        self.client
            .get("/api/keyword/results", query_params(query)?)
            .await
    }
}
