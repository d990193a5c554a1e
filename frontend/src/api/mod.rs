//! Domain API modules: one thin façade per backend subsystem.
//!
//! Every method maps to exactly one endpoint. Path parameters are
//! interpolated, bodies and query structs are forwarded as-is, and errors from
//! `ApiClient` propagate unchanged – nothing here retries, validates or
//! combines requests.

pub mod ai;
pub mod crawler;
pub mod data;
pub mod keyword;
pub mod pipeline;
pub mod sentiment;
pub mod topics;
pub mod visualization;

pub use ai::AiApi;
pub use crawler::CrawlerApi;
pub use data::DataApi;
pub use keyword::KeywordApi;
pub use pipeline::PipelineClient;
pub use sentiment::SentimentApi;
pub use topics::TopicApi;
pub use visualization::VisualizationApi;

use serde_json::Value;

use crate::error::ApiError;
use crate::models::Envelope;

/// Opaque `{success, data}` result for endpoints whose payload the views
/// interpret themselves.
pub type ApiResult = Result<Envelope<Value>, ApiError>;

/// All primary-endpoint façades sharing one `ApiClient`.
#[derive(Clone)]
pub struct Api {
    pub topics: TopicApi,
    pub crawler: CrawlerApi,
    pub sentiment: SentimentApi,
    pub keyword: KeywordApi,
    pub visualization: VisualizationApi,
    pub ai: AiApi,
    pub data: DataApi,
}

impl Api {
    pub fn new(client: crate::network::ApiClient) -> Self {
        Self {
            topics: TopicApi::new(client.clone()),
            crawler: CrawlerApi::new(client.clone()),
            sentiment: SentimentApi::new(client.clone()),
            keyword: KeywordApi::new(client.clone()),
            visualization: VisualizationApi::new(client.clone()),
            ai: AiApi::new(client.clone()),
            data: DataApi::new(client),
        }
    }
}
