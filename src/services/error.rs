use sea_orm::{DbErr, SqlErr, TransactionError};

use crate::genres::GenreError;

/// Failure kinds surfaced by the listing services.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// A required field is missing or malformed. Raised before any write.
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    /// The store refused the write, e.g. shows still reference a venue.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    /// Connection, query or commit failure.
    #[error("Store failure: {0}")]
    Store(#[source] DbErr),
}

pub type ListingResult<T> = Result<T, ListingError>;

impl ListingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Short machine-readable name, used in HTTP and GraphQL error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound { .. } => "not_found",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::Store(_) => "store_failure",
        }
    }
}

impl From<DbErr> for ListingError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(message))
            | Some(SqlErr::UniqueConstraintViolation(message)) => {
                Self::ConstraintViolation(message)
            }
            _ => Self::Store(err),
        }
    }
}

impl From<TransactionError<ListingError>> for ListingError {
    fn from(err: TransactionError<ListingError>) -> Self {
        match err {
            TransactionError::Connection(err) => err.into(),
            TransactionError::Transaction(err) => err,
        }
    }
}

impl From<GenreError> for ListingError {
    fn from(err: GenreError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_error_is_validation() {
        let err: ListingError = GenreError::Empty.into();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("At least one genre"));
    }

    #[test]
    fn test_transaction_error_unwraps_inner() {
        let err: ListingError =
            TransactionError::Transaction(ListingError::not_found("Venue", 7)).into();
        assert!(matches!(
            err,
            ListingError::NotFound {
                entity: "Venue",
                id: 7
            }
        ));
        assert_eq!(err.to_string(), "Venue 7 not found");
    }

    #[test]
    fn test_generic_db_error_is_store_failure() {
        let err: ListingError = DbErr::Custom("connection reset".to_string()).into();
        assert_eq!(err.kind(), "store_failure");
    }
}
