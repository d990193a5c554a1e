use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{Envelope, Topic, TopicId};
use crate::network::{json_body, ApiClient};

const TOPICS_PATH: &str = "/api/manage/topics";

/// Topic management (`/api/manage/topics`).
#[derive(Clone)]
pub struct TopicApi {
    client: ApiClient,
}

impl TopicApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Envelope<Vec<Topic>>, ApiError> {
        self.client.get(TOPICS_PATH, Vec::new()).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Envelope<Topic>, ApiError> {
        self.client.post(TOPICS_PATH, Some(json_body(data)?)).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: TopicId,
        data: &B,
    ) -> Result<Envelope<Topic>, ApiError> {
        self.client
            .put(&format!("{}/{}", TOPICS_PATH, id), Some(json_body(data)?))
            .await
    }

    pub async fn delete(&self, id: TopicId) -> Result<Envelope<Value>, ApiError> {
        self.client.delete(&format!("{}/{}", TOPICS_PATH, id)).await
    }
}
