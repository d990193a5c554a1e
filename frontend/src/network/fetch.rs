//! Browser transport built on `window.fetch`.

use async_trait::async_trait;
use futures::future::{self, Either};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, RequestMode, Response};

use super::transport::{ApiRequest, RawResponse, Transport};
use crate::error::ApiError;

/// Sends requests through the page's `fetch`, aborting them once the
/// configured timeout elapses.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    fn build_request(request: &ApiRequest, controller: &AbortController) -> Result<Request, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        opts.set_mode(RequestMode::Cors);
        opts.set_signal(Some(&controller.signal()));

        let headers = Headers::new()?;
        for (name, value) in &request.headers {
            headers.append(name, value)?;
        }
        opts.set_headers(&headers);

        if let Some(body) = &request.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&request.url, &opts)
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let window = web_sys::window()
            .ok_or_else(|| ApiError::Network("no global window exists".to_string()))?;
        let controller = AbortController::new().map_err(ApiError::from_js)?;
        let js_request = Self::build_request(&request, &controller).map_err(ApiError::from_js)?;

        let fetch = JsFuture::from(window.fetch_with_request(&js_request));
        let millis = u32::try_from(request.timeout.as_millis()).unwrap_or(u32::MAX);
        let deadline = TimeoutFuture::new(millis);
        futures::pin_mut!(fetch, deadline);

        let resp_value = match future::select(fetch, deadline).await {
            Either::Left((result, _)) => result.map_err(ApiError::from_js)?,
            Either::Right(((), _)) => {
                controller.abort();
                return Err(ApiError::Timeout(request.timeout));
            }
        };

        let response: Response = resp_value.dyn_into().map_err(ApiError::from_js)?;
        let status = response.status();
        let text = JsFuture::from(response.text().map_err(ApiError::from_js)?)
            .await
            .map_err(ApiError::from_js)?;

        Ok(RawResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}
