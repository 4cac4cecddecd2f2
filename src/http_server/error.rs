use std::any::Any;

use axum::{
    Json,
    body::Body,
    http::{Response, StatusCode, Uri},
    response::IntoResponse,
};
use serde_json::json;

use crate::services::error::ListingError;

// A generic error report
// Produced via `Err(some_err).wrap_err("Some context")`
// or `Err(color_eyre::eyre::Report::new(SomeError))`
pub struct Report(color_eyre::Report);

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<E> From<E> for Report
where
    E: Into<color_eyre::Report>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Tell axum how to convert `Report` into a response.
impl IntoResponse for Report {
    fn into_response(self) -> Response<Body> {
        let err = self.0;
        log::error!("{err:?}");

        server_error()
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response<Body> {
        let status = match &self {
            ListingError::Validation(_) => StatusCode::BAD_REQUEST,
            ListingError::NotFound { .. } => StatusCode::NOT_FOUND,
            ListingError::ConstraintViolation(_) => StatusCode::CONFLICT,
            ListingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Store details stay in the log
        if status.is_server_error() {
            return Report::from(self).into_response();
        }

        (
            status,
            Json(json!({
                "success": false,
                "kind": self.kind(),
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

/// Generic server-error page.
pub fn server_error() -> Response<Body> {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "kind": "server_error",
            "message": "Something went wrong",
        })),
    )
        .into_response()
}

/// Turn a handler panic into the server-error page.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    log::error!("Request handler panicked: {}", details);

    server_error()
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> Response<Body> {
    log::debug!("No route for {}", uri.path());
    not_found_response(uri.path())
}

pub fn not_found_response(path: &str) -> Response<Body> {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "kind": "not_found",
            "message": format!("Page not found: {}", path),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_listing_error_statuses() {
        let cases = [
            (
                ListingError::validation("Field 'name' is required"),
                StatusCode::BAD_REQUEST,
            ),
            (ListingError::not_found("Venue", 4), StatusCode::NOT_FOUND),
            (
                ListingError::ConstraintViolation("Venue 1 still has 2 show(s)".into()),
                StatusCode::CONFLICT,
            ),
            (
                ListingError::Store(DbErr::Custom("connection refused".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_store_failure_hides_details() {
        let err = ListingError::Store(DbErr::Custom("disk I/O error".into()));
        let body = body_json(err.into_response()).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Something went wrong");
    }

    #[tokio::test]
    async fn test_not_found_body_names_kind() {
        let err = ListingError::not_found("Artist", 9);
        let body = body_json(err.into_response()).await;
        assert_eq!(body["kind"], "not_found");
        assert_eq!(body["message"], "Artist 9 not found");
    }

    #[test]
    fn test_panic_becomes_server_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
