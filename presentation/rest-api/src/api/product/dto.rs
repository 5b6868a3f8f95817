use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use business::domain::product::model::Product;
use business::domain::product::value_objects::{ProductStatus, Shop};

#[derive(Debug, Clone, Serialize, Deserialize, Enum)]
pub enum ProductStatusDto {
    #[oai(rename = "In stock")]
    InStock,
    #[oai(rename = "To buy")]
    ToBuy,
    #[oai(rename = "Just bought")]
    JustBought,
}

impl From<ProductStatus> for ProductStatusDto {
    fn from(status: ProductStatus) -> Self {
        match status {
            ProductStatus::InStock => ProductStatusDto::InStock,
            ProductStatus::ToBuy => ProductStatusDto::ToBuy,
            ProductStatus::JustBought => ProductStatusDto::JustBought,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Enum)]
pub enum ShopDto {
    #[oai(rename = "Albert Heijn")]
    AlbertHeijn,
    #[oai(rename = "Jumbo")]
    Jumbo,
    #[oai(rename = "Lidl")]
    Lidl,
    #[oai(rename = "Aldi")]
    Aldi,
    #[oai(rename = "Plus")]
    Plus,
}

impl From<Shop> for ShopDto {
    fn from(shop: Shop) -> Self {
        match shop {
            Shop::AlbertHeijn => ShopDto::AlbertHeijn,
            Shop::Jumbo => ShopDto::Jumbo,
            Shop::Lidl => ShopDto::Lidl,
            Shop::Aldi => ShopDto::Aldi,
            Shop::Plus => ShopDto::Plus,
        }
    }
}

// Request bodies take status and shops as plain text so that the product
// model reports unknown values per field instead of a generic parse error.

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Product name (cannot be empty)
    pub product_name: String,
    /// "In stock", "To buy" or "Just bought"
    pub status: String,
    /// Shops the product can be bought at
    #[oai(default)]
    pub shops: Vec<String>,
}

/// Full replacement of a product
#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ReplaceProductRequest {
    /// Product name (cannot be empty)
    pub product_name: String,
    /// "In stock", "To buy" or "Just bought"
    pub status: String,
    /// Shops the product can be bought at
    #[oai(default)]
    pub shops: Vec<String>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// Product name (cannot be empty)
    #[oai(skip_serializing_if_is_none)]
    pub product_name: Option<String>,
    /// "In stock", "To buy" or "Just bought"
    #[oai(skip_serializing_if_is_none)]
    pub status: Option<String>,
    /// Shops the product can be bought at
    #[oai(skip_serializing_if_is_none)]
    pub shops: Option<Vec<String>>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Identifier assigned by the service
    pub id: String,
    /// Product name
    pub product_name: String,
    /// Product status
    pub status: ProductStatusDto,
    /// Shops the product can be bought at
    pub shops: Vec<ShopDto>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            // Products read from the repository always carry their id
            id: product.id.map(|id| id.to_string()).unwrap_or_default(),
            product_name: product.product_name,
            status: product.status.into(),
            shops: product.shops.into_iter().map(|s| s.into()).collect(),
        }
    }
}
