use super::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.validation_failed")]
    Validation(#[from] ValidationErrors),
    #[error("product.not_found")]
    NotFound,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
