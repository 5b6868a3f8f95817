use business::domain::product::model::Product;

/// A mutation requested from a product dialog, waiting to be sent to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductIntent {
    Create(Product),
    Update(Product),
    Remove(Product),
}
