use async_graphql::{Error, ErrorExtensions};

use crate::services::error::ListingError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GraphqlError {
    #[error("{message}")]
    Listing { kind: &'static str, message: String },
    #[error("Failed to get app state")]
    FailedToGetAppState,
}

impl From<ListingError> for GraphqlError {
    fn from(err: ListingError) -> Self {
        let message = match &err {
            ListingError::Store(_) => {
                log::error!("GraphQL error: {:#?}", err);
                "Something went wrong".to_string()
            }
            _ => err.to_string(),
        };

        Self::Listing {
            kind: err.kind(),
            message,
        }
    }
}

impl ErrorExtensions for GraphqlError {
    fn extend(&self) -> Error {
        Error::new(format!("{}", self)).extend_with(|_err, e| match self {
            GraphqlError::Listing { kind, message } => {
                e.set("kind", kind.to_string());
                e.set("reason", message.clone());
            }
            GraphqlError::FailedToGetAppState => {
                e.set("kind", "server_error".to_string());
                e.set("reason", "Failed to get app state".to_string());
            }
        })
    }
}

// Newtype wrapper to avoid blanket From implementation conflict for GraphqlError and async_graphql::Error
#[derive(Debug, Clone)]
pub struct GraphqlErrorWrapper(GraphqlError);

impl From<GraphqlError> for GraphqlErrorWrapper {
    fn from(err: GraphqlError) -> Self {
        Self(err)
    }
}

impl From<GraphqlErrorWrapper> for Error {
    fn from(wrapper: GraphqlErrorWrapper) -> Self {
        wrapper.0.extend()
    }
}

impl From<ListingError> for GraphqlErrorWrapper {
    fn from(err: ListingError) -> Self {
        GraphqlError::from(err).into()
    }
}

pub type GraphqlResult<T> = Result<T, GraphqlErrorWrapper>;
