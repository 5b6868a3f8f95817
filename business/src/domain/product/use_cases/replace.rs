use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::value_objects::ProductId;

pub struct ReplaceProductParams {
    pub id: ProductId,
    pub product_name: String,
    pub status: String,
    pub shops: Vec<String>,
}

#[async_trait]
pub trait ReplaceProductUseCase: Send + Sync {
    async fn execute(&self, params: ReplaceProductParams) -> Result<Product, ProductError>;
}
