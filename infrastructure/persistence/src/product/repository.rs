use std::sync::Arc;

use async_trait::async_trait;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;
use business::domain::product::repository::ProductRepository;
use business::domain::product::value_objects::ProductId;

use crate::db::JsonFileDatabase;

use super::entity::ProductEntity;

pub struct ProductRepositoryJsonFile {
    db: Arc<JsonFileDatabase>,
}

impl ProductRepositoryJsonFile {
    pub fn new(db: Arc<JsonFileDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryJsonFile {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let entities = self.db.read(|data| data.products.clone()).await;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        let entity = self
            .db
            .read(|data| {
                data.products
                    .iter()
                    .find(|e| e.id == id.as_str())
                    .cloned()
            })
            .await
            .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    /// Replaces the stored product with the same id in place, or appends it.
    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        let entity = ProductEntity::from_domain(product).ok_or(RepositoryError::Persistence)?;

        self.db
            .write(|data| {
                match data.products.iter_mut().find(|e| e.id == entity.id) {
                    Some(existing) => *existing = entity,
                    None => data.products.push(entity),
                }
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Saving product failed");
                RepositoryError::DatabaseError
            })
    }

    /// Looks the product up and overwrites it under one lock, so a delete can
    /// never be undone by an update that started before it.
    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let entity = ProductEntity::from_domain(product).ok_or(RepositoryError::Persistence)?;

        let found = self
            .db
            .write(|data| match data.products.iter_mut().find(|e| e.id == entity.id) {
                Some(existing) => {
                    *existing = entity;
                    true
                }
                None => false,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Updating product failed");
                RepositoryError::DatabaseError
            })?;

        if found { Ok(()) } else { Err(RepositoryError::NotFound) }
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        self.db
            .write(|data| data.products.retain(|e| e.id != id.as_str()))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Deleting product failed");
                RepositoryError::DatabaseError
            })
    }
}
