use business::domain::product::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("form.invalid")]
    Invalid(#[from] ValidationErrors),
    #[error("form.closed")]
    Closed,
    #[error("form.delete_unavailable")]
    DeleteUnavailable,
}
