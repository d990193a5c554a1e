//! Error type shared by the transport, the domain API modules and the stores.
//!
//! The Transport Client never looks at the `success` flag of a response, so
//! `Rejected` is only ever produced by callers that do (the topic store).

use std::time::Duration;

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    #[error("API request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("backend rejected the request: {message}")]
    Rejected { message: String },
}

/// Coarse classification handed to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Backend unreachable, timed out or answered with a 5xx.
    Network,
    /// Backend understood the request and refused it.
    Application,
    /// Payload could not be encoded or decoded on our side.
    Validation,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) | ApiError::Timeout(_) => ErrorKind::Network,
            ApiError::Status { status, .. } if *status >= 500 => ErrorKind::Network,
            ApiError::Status { .. } | ApiError::Rejected { .. } => ErrorKind::Application,
            ApiError::Decode(_) | ApiError::Encode(_) => ErrorKind::Validation,
        }
    }

    /// Wrap a rejected JS promise (fetch, headers, request construction).
    pub fn from_js(value: JsValue) -> Self {
        ApiError::Network(describe_js(&value))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
