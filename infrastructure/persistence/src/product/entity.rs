use serde::{Deserialize, Serialize};

use business::domain::product::model::Product;
use business::domain::product::value_objects::{ProductId, ProductStatus, Shop};

/// A product as stored in the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEntity {
    pub id: String,
    pub product_name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shops: Vec<String>,
}

impl ProductEntity {
    /// Returns `None` for products that were never persisted.
    pub fn from_domain(product: &Product) -> Option<Self> {
        let id = product.id.as_ref()?;
        Some(Self {
            id: id.to_string(),
            product_name: product.product_name.clone(),
            status: product.status.to_string(),
            shops: product.shops.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Unknown values from a hand-edited file are replaced (status) or dropped
    /// (shops) and logged, since the next write stores the cleaned record.
    pub fn into_domain(self) -> Product {
        let status = self.status.parse::<ProductStatus>().unwrap_or_else(|_| {
            tracing::warn!(id = %self.id, status = %self.status, "Unknown stored status, reading as In stock");
            ProductStatus::InStock
        });

        let shops = self
            .shops
            .iter()
            .filter_map(|s| match s.parse::<Shop>() {
                Ok(shop) => Some(shop),
                Err(_) => {
                    tracing::warn!(id = %self.id, shop = %s, "Unknown stored shop dropped");
                    None
                }
            })
            .collect();

        Product::from_repository(ProductId::new(self.id), self.product_name, status, shops)
    }
}
