use super::ApiResult;
use crate::models::VisualizationQuery;
use crate::network::{query_params, ApiClient};

/// Chart data series. Each maps onto `/api/visualization/{series}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSeries {
    Trend,
    Sentiment,
    Keyword,
    Geographic,
}

impl ChartSeries {
    pub fn path(&self) -> &'static str {
        match self {
            ChartSeries::Trend => "/api/visualization/trend",
            ChartSeries::Sentiment => "/api/visualization/sentiment",
            ChartSeries::Keyword => "/api/visualization/keyword",
            ChartSeries::Geographic => "/api/visualization/geographic",
        }
    }
}

#[derive(Clone)]
pub struct VisualizationApi {
    client: ApiClient,
}

impl VisualizationApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn series(&self, series: ChartSeries, query: &VisualizationQuery) -> ApiResult {
        self.client.get(series.path(), query_params(query)?).await
    }

    pub async fn trend(&self, query: &VisualizationQuery) -> ApiResult {
        self.series(ChartSeries::Trend, query).await
    }

    pub async fn sentiment(&self, query: &VisualizationQuery) -> ApiResult {
        self.series(ChartSeries::Sentiment, query).await
    }

    pub async fn keyword(&self, query: &VisualizationQuery) -> ApiResult {
        self.series(ChartSeries::Keyword, query).await
    }

    pub async fn geographic(&self, query: &VisualizationQuery) -> ApiResult {
        self.series(ChartSeries::Geographic, query).await
    }
}
