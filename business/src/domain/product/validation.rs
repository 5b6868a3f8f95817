use std::collections::BTreeMap;

/// Fields of a product that can fail validation, keyed by their wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductField {
    ProductName,
    Status,
    Shops,
}

impl ProductField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::ProductName => "productName",
            ProductField::Status => "status",
            ProductField::Shops => "shops",
        }
    }
}

impl std::fmt::Display for ProductField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Use code-style identifiers for i18n compatibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("product.name_empty")]
    NameEmpty,
    #[error("product.status_invalid")]
    StatusInvalid,
    #[error("product.shop_invalid")]
    ShopInvalid,
}

/// Field-level validation failures of a candidate product.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("product.validation_failed")]
pub struct ValidationErrors {
    fields: BTreeMap<ProductField, FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `field`; the first error recorded for a field wins.
    pub fn add(&mut self, field: ProductField, error: FieldError) {
        self.fields.entry(field).or_insert(error);
    }

    pub fn get(&self, field: ProductField) -> Option<&FieldError> {
        self.fields.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductField, &FieldError)> {
        self.fields.iter().map(|(field, error)| (*field, error))
    }

    /// Returns `Ok(value)` when no error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}
