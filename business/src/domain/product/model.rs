use std::collections::BTreeSet;

use super::validation::{FieldError, ProductField, ValidationErrors};
use super::value_objects::{ProductId, ProductStatus, Shop};

/// A grocery product. `id` is set if and only if the collection service has
/// accepted the product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Option<ProductId>,
    pub product_name: String,
    pub status: ProductStatus,
    pub shops: BTreeSet<Shop>,
}

/// The mutable part of a product, i.e. everything but its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub product_name: String,
    pub status: ProductStatus,
    pub shops: BTreeSet<Shop>,
}

pub struct NewProductProps {
    pub product_name: String,
    pub status: ProductStatus,
    pub shops: BTreeSet<Shop>,
}

/// An unchecked record as typed by a user or received over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCandidate {
    pub id: Option<String>,
    pub product_name: String,
    pub status: String,
    pub shops: Vec<String>,
}

impl Product {
    /// Creates a product that has not been persisted yet.
    pub fn new(props: NewProductProps) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if props.product_name.trim().is_empty() {
            errors.add(ProductField::ProductName, FieldError::NameEmpty);
        }

        errors.into_result(Self {
            id: None,
            product_name: props.product_name,
            status: props.status,
            shops: props.shops,
        })
    }

    /// Validates every field of `candidate` and reports all failures at once.
    pub fn from_candidate(candidate: ProductCandidate) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if candidate.product_name.trim().is_empty() {
            errors.add(ProductField::ProductName, FieldError::NameEmpty);
        }

        let status = match candidate.status.parse::<ProductStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.add(ProductField::Status, FieldError::StatusInvalid);
                None
            }
        };

        let mut shops = BTreeSet::new();
        for name in &candidate.shops {
            match name.parse::<Shop>() {
                Ok(shop) => {
                    shops.insert(shop);
                }
                Err(_) => errors.add(ProductField::Shops, FieldError::ShopInvalid),
            }
        }

        match status {
            Some(status) if errors.is_empty() => Ok(Self {
                id: candidate.id.map(ProductId::from),
                product_name: candidate.product_name,
                status,
                shops,
            }),
            _ => Err(errors),
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: ProductId,
        product_name: String,
        status: ProductStatus,
        shops: BTreeSet<Shop>,
    ) -> Self {
        Self {
            id: Some(id),
            product_name,
            status,
            shops,
        }
    }

    pub fn from_fields(id: Option<ProductId>, fields: ProductFields) -> Self {
        Self {
            id,
            product_name: fields.product_name,
            status: fields.status,
            shops: fields.shops,
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn fields(&self) -> ProductFields {
        ProductFields {
            product_name: self.product_name.clone(),
            status: self.status,
            shops: self.shops.clone(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_in_stock(&self) -> bool {
        self.status.is_in_stock()
    }

    pub fn needs_purchase(&self) -> bool {
        self.status.needs_purchase()
    }

    /// Case-insensitive substring match on the product name.
    pub fn matches_search(&self, search: &str) -> bool {
        self.product_name
            .to_lowercase()
            .contains(&search.to_lowercase())
    }
}
