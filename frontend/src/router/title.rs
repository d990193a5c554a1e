use tracing::warn;

use super::routes::RouteDescriptor;
use crate::constants::{PRODUCT_TITLE, TITLE_SEPARATOR};

/// Where the navigation guard writes the document title.
pub trait TitleSink {
    fn set_title(&self, title: &str);
}

/// Writes `document.title` of the current page.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTitle;

impl TitleSink for DocumentTitle {
    fn set_title(&self, title: &str) {
        match web_sys::window().and_then(|w| w.document()) {
            Some(document) => document.set_title(title),
            None => warn!(title, "No document available to set title"),
        }
    }
}

/// `"<route title> - <product>"`, or just the product title.
pub fn title_for(route: &RouteDescriptor) -> String {
    match route.meta.title {
        Some(title) => format!("{}{}{}", title, TITLE_SEPARATOR, PRODUCT_TITLE),
        None => PRODUCT_TITLE.to_string(),
    }
}
