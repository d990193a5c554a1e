// Backend endpoints – single source of truth for the defaults used when no
// build-time override is present.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_PIPELINE_API_BASE_URL: &str = "http://localhost:5000";

// Pipeline runs (crawl + sync + analysis) routinely take minutes.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 300_000;

pub const CONTENT_TYPE_JSON: &str = "application/json";

// Document title used when a route carries no title of its own
pub const PRODUCT_TITLE: &str = "微博情感分析平台";
pub const TITLE_SEPARATOR: &str = " - ";

// Crawler defaults mirrored from the backend
pub const DEFAULT_HOT_TOPIC_LIMIT: u32 = 10;
pub const DEFAULT_KEYWORD_TOP_N: u32 = 50;
