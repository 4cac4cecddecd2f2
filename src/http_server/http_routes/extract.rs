use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::Response,
};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;

use crate::http_server::error::not_found_response;
use crate::services::error::ListingError;

/// Numeric id from the route path. Anything that is not an id is treated as
/// an unknown page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                log::debug!("Bad id in {}: {}", parts.uri.path(), rejection);
                Err(not_found_response(parts.uri.path()))
            }
        }
    }
}

/// Form body that reports decoding failures as validation errors.
#[derive(Debug)]
pub struct FormInput<T>(pub T);

impl<T, S> FromRequest<S> for FormInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ListingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ListingError::validation(rejection.to_string()))?;
        Ok(Self(value))
    }
}
