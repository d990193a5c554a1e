//! Crawler/pipeline/visualization calls made through the second, independently
//! configured client.
//!
//! This backend surface answers with `{status, message, results}` or
//! `{success, topics}` shapes rather than the `{success, data}` envelope, so
//! bodies are handed back as plain JSON.

use serde_json::Value;

use crate::error::ApiError;
use crate::models::{HotTopicsRequest, PipelineRunRequest, SearchRequest, TopicId};
use crate::network::{json_body, ApiClient};

#[derive(Clone)]
pub struct PipelineClient {
    client: ApiClient,
}

impl PipelineClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // ---------------- Crawler ----------------

    pub async fn crawl_hot_topics(&self, request: &HotTopicsRequest) -> Result<Value, ApiError> {
        self.client
            .post("/api/crawler/hot-topics", Some(json_body(request)?))
            .await
    }

    pub async fn search_topic(&self, keyword: &str) -> Result<Value, ApiError> {
        let request = SearchRequest { keyword: keyword.to_string() };
        self.client
            .post("/api/crawler/search", Some(json_body(&request)?))
            .await
    }

    pub async fn sync_data(&self) -> Result<Value, ApiError> {
        self.client.post("/api/crawler/sync", None).await
    }

    pub async fn crawler_status(&self) -> Result<Value, ApiError> {
        self.client.get("/api/crawler/status", Vec::new()).await
    }

    // ---------------- Pipeline ----------------

    pub async fn run(&self, request: &PipelineRunRequest) -> Result<Value, ApiError> {
        self.client
            .post("/api/pipeline/run", Some(json_body(request)?))
            .await
    }

    /// Analysis-only run (keywords + sentiment) for an already crawled topic.
    pub async fn process(&self, topic_id: TopicId) -> Result<Value, ApiError> {
        self.client
            .post(&format!("/api/pipeline/process/{}", topic_id), None)
            .await
    }

    pub async fn pipeline_status(&self) -> Result<Value, ApiError> {
        self.client.get("/api/pipeline/status", Vec::new()).await
    }

    // ---------------- Visualization ----------------

    pub async fn visualization_topics(&self) -> Result<Value, ApiError> {
        self.client.get("/api/visualization/topics", Vec::new()).await
    }

    pub async fn topic_keywords(&self, topic_id: TopicId) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/api/visualization/topics/{}/keywords", topic_id), Vec::new())
            .await
    }

    pub async fn topic_sentiments(&self, topic_id: TopicId) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/api/visualization/topics/{}/sentiments", topic_id), Vec::new())
            .await
    }
}
