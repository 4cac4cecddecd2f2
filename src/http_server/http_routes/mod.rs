use axum::{Json, http::StatusCode};
use serde::{Deserialize, Deserializer, Serialize};

pub mod artists;
pub mod extract;
pub mod shows;
pub mod venues;

/// Body of every write acknowledgment.
#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

pub(crate) fn created(message: String, id: i64) -> (StatusCode, Json<WriteResponse>) {
    (
        StatusCode::CREATED,
        Json(WriteResponse {
            success: true,
            message,
            id: Some(id),
        }),
    )
}

pub(crate) fn done(message: String) -> Json<WriteResponse> {
    Json(WriteResponse {
        success: true,
        message,
        id: None,
    })
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

pub async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// HTML checkboxes send a value only when checked.
pub(crate) fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "on" | "true" | "1"
    ))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, Response, header},
    };
    use tower::ServiceExt;

    use crate::http_server::{app::build_router, state::AppState};
    use crate::test_utils::test_db;

    pub async fn test_app() -> Router {
        let db = test_db().await;
        build_router(Arc::new(AppState { db }))
    }

    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        form: Option<&str>,
    ) -> Response<Body> {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match form {
            Some(form) => {
                request =
                    request.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };

        app.clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
