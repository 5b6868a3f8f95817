use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{Product, ProductCandidate};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::replace::{ReplaceProductParams, ReplaceProductUseCase};

pub struct ReplaceProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ReplaceProductUseCase for ReplaceProductUseCaseImpl {
    async fn execute(&self, params: ReplaceProductParams) -> Result<Product, ProductError> {
        self.logger
            .info(&format!("Replacing product: {}", params.id));

        let product = Product::from_candidate(ProductCandidate {
            id: Some(params.id.to_string()),
            product_name: params.product_name,
            status: params.status,
            shops: params.shops,
        })?;

        self.repository
            .update(&product)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ProductError::NotFound,
                other => ProductError::Repository(other),
            })?;

        Ok(product)
    }
}
