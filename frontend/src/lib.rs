use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub mod api;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod network;
pub mod router;
pub mod stores;

#[cfg(test)]
mod tests;

use api::{Api, PipelineClient};
use network::{ApiClient, ApiConfig, FetchTransport, Transport};
use router::{DocumentTitle, Router, TitleSink};
use stores::TopicStore;

/// Everything a view needs: both API clients, the topic store and the router.
///
/// Built once at start and kept for the lifetime of the page. Clones share
/// state.
#[derive(Clone)]
pub struct App {
    pub api: Api,
    pub pipeline: PipelineClient,
    pub topics: TopicStore,
    pub router: Router,
    primary_client: ApiClient,
    pipeline_client: ApiClient,
}

impl App {
    pub fn new(
        primary: ApiConfig,
        pipeline: ApiConfig,
        transport: Rc<dyn Transport>,
        title: Rc<dyn TitleSink>,
    ) -> Self {
        let primary_client = ApiClient::new(primary, transport.clone());
        let pipeline_client = ApiClient::new(pipeline, transport);
        let api = Api::new(primary_client.clone());
        Self {
            topics: TopicStore::new(api.topics.clone()),
            pipeline: PipelineClient::new(pipeline_client.clone()),
            router: Router::new(title),
            api,
            primary_client,
            pipeline_client,
        }
    }

    /// Re-point both clients. Every façade, the topic store and its
    /// subscribers stay in place; callers refetch through `topics`.
    pub fn reconfigure(&self, primary: ApiConfig, pipeline: ApiConfig) {
        self.primary_client.set_config(primary);
        self.pipeline_client.set_config(pipeline);
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

/// Run `f` against the running app, if started.
pub fn with_app<R>(f: impl FnOnce(&App) -> R) -> Option<R> {
    APP.with(|app| app.borrow().as_ref().map(f))
}

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let path = window.location().pathname().unwrap_or_else(|_| "/".to_string());

    let primary = ApiConfig::primary();
    let base_url = primary.base_url().to_string();
    let app = App::new(
        primary,
        ApiConfig::pipeline(),
        Rc::new(FetchTransport),
        Rc::new(DocumentTitle),
    );

    let route = app
        .router
        .start(&path)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    info!(route = route.name(), %base_url, "Dashboard started");

    let topics = app.topics.clone();
    spawn_local(async move { topics.fetch_all().await });

    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

/// Point both clients at new base URLs at runtime. The pipeline client
/// follows `base_url` unless given its own. Refetches the topic list.
#[wasm_bindgen]
pub fn configure_api(base_url: &str, pipeline_base_url: Option<String>) -> Result<(), JsValue> {
    let primary = ApiConfig::from_url(base_url);
    let pipeline = ApiConfig::from_url(pipeline_base_url.as_deref().unwrap_or(base_url));

    let topics = with_app(|app| {
        app.reconfigure(primary, pipeline);
        app.topics.clone()
    })
    .ok_or_else(|| JsValue::from_str("app not started"))?;

    info!(base_url, "API endpoints reconfigured");
    spawn_local(async move { topics.fetch_all().await });
    Ok(())
}

/// Drop the app context. Pending requests finish but nothing observes them.
#[wasm_bindgen]
pub fn shutdown() {
    let had_app = APP.with(|slot| slot.borrow_mut().take().is_some());
    if had_app {
        info!("Dashboard shut down");
    } else {
        warn!("shutdown called before start");
    }
}
