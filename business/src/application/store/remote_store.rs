use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use crate::domain::errors::TransportError;
use crate::domain::logger::Logger;
use crate::domain::product::events::CollectionChanged;
use crate::domain::product::gateway::{ProductGateway, RemoteStoreConfig};
use crate::domain::product::model::Product;
use crate::domain::product::value_objects::ProductId;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("store.product_not_persisted")]
    NotPersisted,
}

/// Client side of the product collection.
///
/// Holds the last fetched collection (the snapshot). Mutations never patch the
/// snapshot locally: they drop it and publish a [`CollectionChanged`] so that
/// subscribers read the authoritative state again through [`Self::list`].
pub struct RemoteProductStore {
    config: RemoteStoreConfig,
    gateway: Arc<dyn ProductGateway>,
    logger: Arc<dyn Logger>,
    snapshot: RwLock<Option<Vec<Product>>>,
    changes: broadcast::Sender<CollectionChanged>,
}

impl RemoteProductStore {
    pub fn new(
        config: RemoteStoreConfig,
        gateway: Arc<dyn ProductGateway>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            config,
            gateway,
            logger,
            snapshot: RwLock::new(None),
            changes,
        }
    }

    pub fn config(&self) -> &RemoteStoreConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CollectionChanged> {
        self.changes.subscribe()
    }

    /// The last fetched collection, `None` before the first fetch and after
    /// every mutation.
    pub async fn snapshot(&self) -> Option<Vec<Product>> {
        self.snapshot.read().await.clone()
    }

    pub async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let url = self.config.collection_url();
        self.logger.debug(&format!("Fetching products from {}", url));

        let products = self.gateway.fetch_all(&url).await.inspect_err(|e| {
            self.logger
                .error(&format!("Fetching products failed: {}", e))
        })?;

        *self.snapshot.write().await = Some(products.clone());
        Ok(products)
    }

    /// Submits a new product. Any id already on `product` is not sent.
    pub async fn create(&self, product: &Product) -> Result<Product, StoreError> {
        let url = self.config.collection_url();
        self.logger
            .info(&format!("Creating product: {}", product.product_name));

        let created = self
            .gateway
            .post(&url, &product.fields())
            .await
            .inspect_err(|e| self.logger.error(&format!("Creating product failed: {}", e)))?;

        match &created.id {
            Some(id) => self.collection_changed(CollectionChanged::Created(id.clone())).await,
            None => {
                // Still stale: the service accepted something.
                self.logger.warn("Created product came back without an id");
                self.invalidate().await;
            }
        }
        Ok(created)
    }

    /// Sends every field but the id, which only travels in the URL.
    pub async fn update(&self, product: &Product) -> Result<Product, StoreError> {
        let id = Self::persisted_id(product)?;
        let url = self.config.item_url(id);
        self.logger.info(&format!("Updating product: {}", id));

        let updated = self
            .gateway
            .patch(&url, &product.fields())
            .await
            .inspect_err(|e| self.logger.error(&format!("Updating product failed: {}", e)))?;

        self.collection_changed(CollectionChanged::Updated(id.clone()))
            .await;
        Ok(updated)
    }

    pub async fn remove(&self, product: &Product) -> Result<(), StoreError> {
        let id = Self::persisted_id(product)?;
        let url = self.config.item_url(id);
        self.logger.info(&format!("Removing product: {}", id));

        self.gateway
            .delete(&url)
            .await
            .inspect_err(|e| self.logger.error(&format!("Removing product failed: {}", e)))?;

        self.collection_changed(CollectionChanged::Removed(id.clone()))
            .await;
        Ok(())
    }

    fn persisted_id(product: &Product) -> Result<&ProductId, StoreError> {
        product.id.as_ref().ok_or(StoreError::NotPersisted)
    }

    async fn invalidate(&self) {
        *self.snapshot.write().await = None;
    }

    async fn collection_changed(&self, event: CollectionChanged) {
        self.invalidate().await;
        // No subscriber is fine, the next list() reads fresh data anyway.
        if self.changes.send(event).is_err() {
            self.logger.debug("No subscriber for collection change");
        }
    }
}
