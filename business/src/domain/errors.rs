/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.persistence")]
    Persistence,
    #[error("repository.database_error")]
    DatabaseError,
}

impl RepositoryError {
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn persistence() -> Self {
        RepositoryError::Persistence
    }
    pub fn database_error() -> Self {
        RepositoryError::DatabaseError
    }
}

/// Any failure talking to the collection service: network, HTTP status or
/// an undecodable body. 4xx and 5xx responses are not told apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Could not reach the product service: {0}")]
    Network(String),
    #[error("The product service answered with status {status}")]
    Status { status: u16 },
    #[error("Unexpected response from the product service: {0}")]
    Decode(String),
}
