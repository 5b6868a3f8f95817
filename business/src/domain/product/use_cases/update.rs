use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::value_objects::ProductId;

/// Partial update: absent fields keep their stored value.
pub struct UpdateProductParams {
    pub id: ProductId,
    pub product_name: Option<String>,
    pub status: Option<String>,
    pub shops: Option<Vec<String>>,
}

#[async_trait]
pub trait UpdateProductUseCase: Send + Sync {
    async fn execute(&self, params: UpdateProductParams) -> Result<Product, ProductError>;
}
