use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use super::config::ApiConfig;
use super::transport::{ApiRequest, HttpMethod, RawResponse, Transport};
use crate::constants::CONTENT_TYPE_JSON;
use crate::error::ApiError;

/// Query string pairs, in insertion order.
pub type Query = Vec<(String, String)>;

/// Configured request sender shared by every domain API module.
///
/// Clones share both the transport and the config, so `set_config` on any
/// clone re-points every façade built from it.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<RefCell<ApiConfig>>,
    transport: Rc<dyn Transport>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, transport: Rc<dyn Transport>) -> Self {
        Self { config: Rc::new(RefCell::new(config)), transport }
    }

    pub fn config(&self) -> ApiConfig {
        self.config.borrow().clone()
    }

    /// Swap endpoints at runtime. Requests already sent are not affected.
    pub fn set_config(&self, config: ApiConfig) {
        debug!(base_url = config.base_url(), "API client re-pointed");
        *self.config.borrow_mut() = config;
    }

    /// Send one request and decode the response body as `T`.
    ///
    /// The body is returned as the server sent it – `{success, data}` included
    /// – and the `success` flag is never inspected here. Any failure is logged
    /// once and handed back untouched; there is no retry.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Query,
    ) -> Result<T, ApiError> {
        let url = self.config.borrow().url(path, &query)?;
        let result = self.dispatch(method, &url, body).await;
        if let Err(e) = &result {
            error!(%method, %url, error = %e, "API request failed");
        }
        result
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: Query) -> Result<T, ApiError> {
        self.send(HttpMethod::Get, path, None, query).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        self.send(HttpMethod::Post, path, body, Vec::new()).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        self.send(HttpMethod::Put, path, body, Vec::new()).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(HttpMethod::Delete, path, None, Vec::new()).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let body = body
            .map(|value| serde_json::to_string(&value))
            .transpose()
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        let request = ApiRequest {
            method,
            url: url.to_string(),
            headers: vec![
                ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
                ("Accept".to_string(), CONTENT_TYPE_JSON.to_string()),
            ],
            body,
            timeout: self.config.borrow().timeout(),
        };

        debug!(%method, %url, "sending API request");
        let response = self.transport.execute(request).await?;
        intercept(response)
    }
}

/// Response interceptor: reject non-2xx, otherwise hand back the decoded body.
fn intercept<T: DeserializeOwned>(response: RawResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
            message: status_message(&response),
        });
    }

    if response.body.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// Prefer the backend's own `message` field; fall back to the raw body.
fn status_message(response: &RawResponse) -> String {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| response.body.trim().to_string())
}

/// Serialize a JSON body, mapping failures onto `ApiError::Encode`.
pub fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Flatten a struct into query pairs, skipping `null`s.
///
/// Scalars are rendered without JSON quoting; nested values are sent as JSON.
pub fn query_params<P: Serialize + ?Sized>(params: &P) -> Result<Query, ApiError> {
    let value = json_body(params)?;
    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(ApiError::Encode(format!(
                "query parameters must serialize to an object, got {}",
                other
            )))
        }
    };

    Ok(map
        .into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (k, rendered)
        })
        .collect())
}
