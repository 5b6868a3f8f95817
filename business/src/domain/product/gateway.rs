use async_trait::async_trait;
use url::Url;

use crate::domain::errors::TransportError;

use super::model::{Product, ProductFields};
use super::value_objects::ProductId;

#[derive(Debug, thiserror::Error)]
pub enum RemoteStoreConfigError {
    #[error("store.invalid_base_url")]
    InvalidBaseUrl,
    #[error("store.resource_empty")]
    ResourceEmpty,
}

/// Where the collection service lives and which collection it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStoreConfig {
    base_url: Url,
    resource: String,
}

impl RemoteStoreConfig {
    /// `base_url` is the API root (e.g. `http://127.0.0.1:6284/api`),
    /// `resource` the collection name (e.g. `products`).
    pub fn new(base_url: &str, resource: impl Into<String>) -> Result<Self, RemoteStoreConfigError> {
        let base_url = Url::parse(base_url).map_err(|_| RemoteStoreConfigError::InvalidBaseUrl)?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteStoreConfigError::InvalidBaseUrl);
        }

        let resource = resource.into();
        if resource.trim().is_empty() {
            return Err(RemoteStoreConfigError::ResourceEmpty);
        }

        Ok(Self { base_url, resource })
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn collection_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.resource);
        }
        url
    }

    pub fn item_url(&self, id: &ProductId) -> Url {
        let mut url = self.collection_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id.as_str());
        }
        url
    }
}

/// Transport port of the remote store. Bodies never carry the product id;
/// it only travels in the URL.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    async fn fetch_all(&self, url: &Url) -> Result<Vec<Product>, TransportError>;
    async fn post(&self, url: &Url, fields: &ProductFields) -> Result<Product, TransportError>;
    async fn patch(&self, url: &Url, fields: &ProductFields) -> Result<Product, TransportError>;
    async fn delete(&self, url: &Url) -> Result<(), TransportError>;
}
