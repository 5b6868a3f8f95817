use business::domain::product::gateway::{RemoteStoreConfig, RemoteStoreConfigError};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:6284/api";
pub const DEFAULT_RESOURCE: &str = "products";

/// Load the remote store configuration from environment variables
///
/// Environment variables:
/// - GROCERY_API_URL: API root of the collection service (default: "http://127.0.0.1:6284/api")
/// - GROCERY_RESOURCE: Collection name (default: "products")
pub fn remote_store_config_from_env() -> Result<RemoteStoreConfig, RemoteStoreConfigError> {
    let base_url = std::env::var("GROCERY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let resource =
        std::env::var("GROCERY_RESOURCE").unwrap_or_else(|_| DEFAULT_RESOURCE.to_string());

    RemoteStoreConfig::new(&base_url, resource)
}
