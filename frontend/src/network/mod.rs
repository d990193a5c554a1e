pub mod api_client;
pub mod config;
pub mod fetch;
pub mod transport;

// Re-export commonly used items
pub use api_client::{json_body, query_params, ApiClient, Query};
pub use config::ApiConfig;
pub use fetch::FetchTransport;
pub use transport::{ApiRequest, HttpMethod, RawResponse, Transport};
