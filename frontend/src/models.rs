use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{DEFAULT_HOT_TOPIC_LIMIT, DEFAULT_KEYWORD_TOP_N};

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// `{success, data, message}` wrapper the management/analysis backend puts
/// around every payload. Callers gate on `success` before trusting `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), message: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, data: None, message: Some(message.into()) }
    }

    /// Message to log or surface when `success` is false.
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "backend reported success: false".to_string())
    }
}

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(pub u64);

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TopicId {
    fn from(id: u64) -> Self {
        TopicId(id)
    }
}

/// Backend-owned topic. Only `id` is interpreted here; everything else is kept
/// as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Topic {
    pub fn new(id: u64) -> Self {
        Self { id: TopicId(id), attributes: Map::new() }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.attribute("topic_name").and_then(Value::as_str)
    }

    pub fn tag(&self) -> Option<&str> {
        self.attribute("topic_tag").and_then(Value::as_str)
    }

    pub fn is_active(&self) -> Option<bool> {
        self.attribute("is_active").and_then(Value::as_bool)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.attribute("created_at")
            .and_then(Value::as_str)
            .and_then(parse_backend_timestamp)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.attribute("updated_at")
            .and_then(Value::as_str)
            .and_then(parse_backend_timestamp)
    }
}

/// The backend emits naive UTC `isoformat()` strings, occasionally with an
/// offset.
fn parse_backend_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Body for topic creation and partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl TopicInput {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            topic_name: Some(name.into()),
            topic_tag: Some(tag.into()),
            is_active: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Request bodies and query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrawlerStartRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub topic_id: TopicId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordExtractRequest {
    pub topic_id: TopicId,
    pub top_n: u32,
}

impl KeywordExtractRequest {
    pub fn new(topic_id: TopicId) -> Self {
        Self { topic_id, top_n: DEFAULT_KEYWORD_TOP_N }
    }
}

/// Query for sentiment/keyword result listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    Hour,
    Day,
    Week,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisualizationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<TrendPeriod>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRequest {
    pub topic_id: TopicId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyRequest {
    pub topic_id: TopicId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotTopicsRequest {
    pub limit: u32,
    pub filter_sensitive: bool,
}

impl Default for HotTopicsRequest {
    fn default() -> Self {
        Self { limit: DEFAULT_HOT_TOPIC_LIMIT, filter_sensitive: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub keyword: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    #[default]
    HotTopics,
    Search,
}

/// Which pipeline stages to execute; the backend runs all of them when
/// `steps` is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineSteps {
    pub crawl: bool,
    pub sync: bool,
    pub keywords: bool,
    pub sentiment: bool,
}

impl Default for PipelineSteps {
    fn default() -> Self {
        Self { crawl: true, sync: true, keywords: true, sentiment: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineRunRequest {
    pub mode: PipelineMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<PipelineSteps>,
}

impl PipelineRunRequest {
    pub fn hot_topics(limit: u32) -> Self {
        Self { mode: PipelineMode::HotTopics, keyword: None, limit, steps: None }
    }

    pub fn search(keyword: impl Into<String>) -> Self {
        Self {
            mode: PipelineMode::Search,
            keyword: Some(keyword.into()),
            limit: DEFAULT_HOT_TOPIC_LIMIT,
            steps: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn topic_keeps_unknown_attributes() {
        let topic: Topic = serde_json::from_value(json!({
            "id": 7,
            "topic_name": "春节",
            "topic_tag": "#春节#",
            "is_active": true,
            "post_count": 12
        }))
        .unwrap();

        assert_eq!(topic.id, TopicId(7));
        assert_eq!(topic.name(), Some("春节"));
        assert_eq!(topic.tag(), Some("#春节#"));
        assert_eq!(topic.is_active(), Some(true));
        assert_eq!(topic.attribute("post_count"), Some(&json!(12)));

        let back = serde_json::to_value(&topic).unwrap();
        assert_eq!(back["post_count"], json!(12));
        assert_eq!(back["id"], json!(7));
    }

    #[test]
    fn parses_naive_backend_timestamps() {
        let topic = Topic::new(1).with("created_at", "2024-02-10T08:30:00.123456");
        let created = topic.created_at().expect("timestamp");
        assert_eq!(created.to_rfc3339(), "2024-02-10T08:30:00.123456+00:00");
        assert!(Topic::new(2).with("created_at", "yesterday").created_at().is_none());
    }

    #[test]
    fn envelope_tolerates_missing_data() {
        let env: Envelope<Vec<Topic>> =
            serde_json::from_value(json!({"success": false, "message": "查询失败"})).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.failure_message(), "查询失败");
    }

    #[test]
    fn pipeline_request_omits_unset_fields() {
        let body = serde_json::to_value(PipelineRunRequest::hot_topics(5)).unwrap();
        assert_eq!(body, json!({"mode": "hot_topics", "limit": 5}));

        let body = serde_json::to_value(PipelineRunRequest::search("春节")).unwrap();
        assert_eq!(body, json!({"mode": "search", "keyword": "春节", "limit": 10}));
    }
}
