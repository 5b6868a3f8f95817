use super::value_objects::ProductId;

/// Published by the remote store after every successful mutation. Receivers
/// treat it as "the snapshot is stale, read again".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChanged {
    Created(ProductId),
    Updated(ProductId),
    Removed(ProductId),
}

impl CollectionChanged {
    pub fn product_id(&self) -> &ProductId {
        match self {
            CollectionChanged::Created(id)
            | CollectionChanged::Updated(id)
            | CollectionChanged::Removed(id) => id,
        }
    }
}
