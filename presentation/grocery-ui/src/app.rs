use std::sync::Arc;

use business::application::store::remote_store::RemoteProductStore;
use business::domain::product::gateway::{RemoteStoreConfig, RemoteStoreConfigError};
use logger::TracingLogger;
use rest_client::client::RestClient;
use rest_client::config::remote_store_config_from_env;
use rest_client::product_gateway::ProductGatewayHttp;

use crate::view::composer::ViewComposer;

/// Wires the view to the collection service at `config`. Nothing is fetched
/// until [`ViewComposer::load`] is called.
pub fn connect(config: RemoteStoreConfig) -> ViewComposer {
    tracing::info!(url = %config.collection_url(), "Connecting product view");
    let store = RemoteProductStore::new(
        config,
        Arc::new(ProductGatewayHttp::new(RestClient::new())),
        Arc::new(TracingLogger::new("remote-store")),
    );
    ViewComposer::new(Arc::new(store))
}

/// Same as [`connect`], reading `GROCERY_API_URL` and `GROCERY_RESOURCE`.
pub fn connect_from_env() -> Result<ViewComposer, RemoteStoreConfigError> {
    Ok(connect(remote_store_config_from_env()?))
}
