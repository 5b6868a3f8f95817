use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{Product, ProductCandidate};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};

pub struct UpdateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateProductUseCase for UpdateProductUseCaseImpl {
    async fn execute(&self, params: UpdateProductParams) -> Result<Product, ProductError> {
        self.logger
            .info(&format!("Updating product: {}", params.id));

        let existing = self
            .repository
            .get_by_id(&params.id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ProductError::NotFound,
                other => ProductError::Repository(other),
            })?;

        // Absent fields keep the stored value; the merged record is validated as a whole
        let candidate = ProductCandidate {
            id: Some(params.id.to_string()),
            product_name: params.product_name.unwrap_or(existing.product_name),
            status: params
                .status
                .unwrap_or_else(|| existing.status.to_string()),
            shops: params
                .shops
                .unwrap_or_else(|| existing.shops.iter().map(|s| s.to_string()).collect()),
        };
        let updated_product = Product::from_candidate(candidate)?;

        // A concurrent delete between read and write surfaces as NotFound
        self.repository
            .update(&updated_product)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ProductError::NotFound,
                other => ProductError::Repository(other),
            })?;

        self.logger
            .info(&format!("Product updated: {}", params.id));
        Ok(updated_product)
    }
}
