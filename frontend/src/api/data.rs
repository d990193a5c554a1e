use super::ApiResult;
use crate::models::{DataQuery, ExportQuery};
use crate::network::{query_params, ApiClient};

/// Export and historical query (`/api/manage/data/*`).
#[derive(Clone)]
pub struct DataApi {
    client: ApiClient,
}

impl DataApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn export(&self, query: &ExportQuery) -> ApiResult {
        self.client
            .get("/api/manage/data/export", query_params(query)?)
            .await
    }

    pub async fn query(&self, query: &DataQuery) -> ApiResult {
        self.client
            .get("/api/manage/data/query", query_params(query)?)
            .await
    }
}
