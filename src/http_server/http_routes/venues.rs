use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use crate::http_server::http_routes::extract::{FormInput, IdPath};
use crate::http_server::http_routes::{SearchForm, WriteResponse, checkbox, created, done};
use crate::http_server::state::AppState;
use crate::services::SearchResults;
use crate::services::error::ListingError;
use crate::services::forms::NewVenue;
use crate::services::venue::{VenueArea, VenueDetail, VenueProfile, VenueService};

/// Venue form as posted by the create and edit pages.
#[derive(Debug, Deserialize)]
pub struct VenueForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    image_link: String,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    facebook_link: Option<String>,
    #[serde(default)]
    website_link: Option<String>,
    #[serde(default, deserialize_with = "checkbox")]
    seeking_talent: bool,
    #[serde(default)]
    seeking_description: Option<String>,
}

impl From<VenueForm> for NewVenue {
    fn from(form: VenueForm) -> Self {
        Self {
            name: form.name,
            city: form.city,
            state: form.state,
            address: form.address,
            phone: form.phone,
            image_link: form.image_link,
            website_link: form.website_link,
            facebook_link: form.facebook_link,
            genres: form.genres,
            seeking_talent: form.seeking_talent,
            seeking_description: form.seeking_description,
        }
    }
}

pub async fn list_venues(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<VenueArea>>, ListingError> {
    let service = VenueService::new(app_state.db.clone());
    Ok(Json(service.list_areas(Utc::now()).await?))
}

pub async fn search_venues(
    State(app_state): State<Arc<AppState>>,
    FormInput(form): FormInput<SearchForm>,
) -> Result<Json<SearchResults>, ListingError> {
    let service = VenueService::new(app_state.db.clone());
    Ok(Json(service.search(&form.search_term).await?))
}

pub async fn show_venue(
    State(app_state): State<Arc<AppState>>,
    IdPath(venue_id): IdPath,
) -> Result<Json<VenueDetail>, ListingError> {
    let service = VenueService::new(app_state.db.clone());
    Ok(Json(service.detail(venue_id, Utc::now()).await?))
}

pub async fn create_venue(
    State(app_state): State<Arc<AppState>>,
    FormInput(form): FormInput<VenueForm>,
) -> Result<(StatusCode, Json<WriteResponse>), ListingError> {
    let service = VenueService::new(app_state.db.clone());
    let venue = service.create(form.into()).await?;

    Ok(created(
        format!("Venue '{}' was successfully listed!", venue.name),
        venue.id,
    ))
}

pub async fn edit_venue(
    State(app_state): State<Arc<AppState>>,
    IdPath(venue_id): IdPath,
) -> Result<Json<VenueProfile>, ListingError> {
    let service = VenueService::new(app_state.db.clone());
    Ok(Json(service.profile(venue_id).await?))
}

pub async fn update_venue(
    State(app_state): State<Arc<AppState>>,
    IdPath(venue_id): IdPath,
    FormInput(form): FormInput<VenueForm>,
) -> Result<Json<WriteResponse>, ListingError> {
    let service = VenueService::new(app_state.db.clone());
    let venue = service.update(venue_id, form.into()).await?;

    Ok(done(format!("Venue '{}' was successfully updated!", venue.name)))
}

pub async fn delete_venue(
    State(app_state): State<Arc<AppState>>,
    IdPath(venue_id): IdPath,
) -> Result<Json<WriteResponse>, ListingError> {
    let service = VenueService::new(app_state.db.clone());
    service.delete(venue_id).await?;

    Ok(done(format!("Venue {} was successfully deleted.", venue_id)))
}
