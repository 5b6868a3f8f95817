use serde::{Deserialize, Serialize};

use business::domain::errors::TransportError;
use business::domain::product::model::{Product, ProductCandidate, ProductFields};
use business::domain::product::value_objects::{ProductStatus, Shop};

/// Request body for POST and PATCH. Never carries the id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload<'a> {
    pub product_name: &'a str,
    pub status: ProductStatus,
    pub shops: Vec<Shop>,
}

impl<'a> From<&'a ProductFields> for ProductPayload<'a> {
    fn from(fields: &'a ProductFields) -> Self {
        Self {
            product_name: &fields.product_name,
            status: fields.status,
            shops: fields.shops.iter().copied().collect(),
        }
    }
}

/// A product as returned by the collection service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: Option<String>,
    pub product_name: String,
    pub status: String,
    #[serde(default)]
    pub shops: Vec<String>,
}

impl ProductRecord {
    /// Records from the service must carry an id and pass product validation.
    pub fn into_domain(self) -> Result<Product, TransportError> {
        if self.id.is_none() {
            return Err(TransportError::Decode("product without id".to_string()));
        }

        Product::from_candidate(ProductCandidate {
            id: self.id,
            product_name: self.product_name,
            status: self.status,
            shops: self.shops,
        })
        .map_err(|errors| {
            let fields: Vec<String> = errors
                .iter()
                .map(|(field, error)| format!("{}: {}", field, error))
                .collect();
            TransportError::Decode(fields.join(", "))
        })
    }
}
