use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;

use crate::http_server::http_routes::extract::{FormInput, IdPath};
use crate::http_server::http_routes::{WriteResponse, created, done};
use crate::http_server::state::AppState;
use crate::services::error::{ListingError, ListingResult};
use crate::services::forms::{NewShow, parse_start_time};
use crate::services::show::{ShowListing, ShowService};

/// Show form. Ids arrive as text from `<select>` fields.
#[derive(Debug, Deserialize)]
pub struct ShowForm {
    #[serde(default)]
    artist_id: String,
    #[serde(default)]
    venue_id: String,
    #[serde(default)]
    start_time: String,
}

impl TryFrom<ShowForm> for NewShow {
    type Error = ListingError;

    fn try_from(form: ShowForm) -> ListingResult<Self> {
        Ok(Self {
            artist_id: parse_id("artist_id", &form.artist_id)?,
            venue_id: parse_id("venue_id", &form.venue_id)?,
            start_time: parse_start_time(&form.start_time)?,
        })
    }
}

fn parse_id(field: &str, raw: &str) -> ListingResult<Option<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<i64>().map(Some).map_err(|_| {
        ListingError::validation(format!("Field '{}' must be a number, got '{}'", field, raw))
    })
}

pub async fn list_shows(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowListing>>, ListingError> {
    let service = ShowService::new(app_state.db.clone());
    Ok(Json(service.list().await?))
}

pub async fn create_show(
    State(app_state): State<Arc<AppState>>,
    FormInput(form): FormInput<ShowForm>,
) -> Result<(StatusCode, Json<WriteResponse>), ListingError> {
    let service = ShowService::new(app_state.db.clone());
    let show = service.create(form.try_into()?).await?;

    Ok(created("Show was successfully listed!".to_string(), show.id))
}

pub async fn delete_show(
    State(app_state): State<Arc<AppState>>,
    IdPath(show_id): IdPath,
) -> Result<Json<WriteResponse>, ListingError> {
    let service = ShowService::new(app_state.db.clone());
    service.delete(show_id).await?;

    Ok(done(format!("Show {} was successfully deleted.", show_id)))
}
