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
use crate::services::artist::{ArtistDetail, ArtistProfile, ArtistService, ArtistSummary};
use crate::services::error::ListingError;
use crate::services::forms::NewArtist;

/// Artist form as posted by the create and edit pages.
#[derive(Debug, Deserialize)]
pub struct ArtistForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
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
    seeking_venue: bool,
    #[serde(default)]
    seeking_description: Option<String>,
}

impl From<ArtistForm> for NewArtist {
    fn from(form: ArtistForm) -> Self {
        Self {
            name: form.name,
            city: form.city,
            state: form.state,
            phone: form.phone,
            image_link: form.image_link,
            website_link: form.website_link,
            facebook_link: form.facebook_link,
            genres: form.genres,
            seeking_venue: form.seeking_venue,
            seeking_description: form.seeking_description,
        }
    }
}

pub async fn list_artists(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistSummary>>, ListingError> {
    let service = ArtistService::new(app_state.db.clone());
    Ok(Json(service.list().await?))
}

pub async fn search_artists(
    State(app_state): State<Arc<AppState>>,
    FormInput(form): FormInput<SearchForm>,
) -> Result<Json<SearchResults>, ListingError> {
    let service = ArtistService::new(app_state.db.clone());
    Ok(Json(service.search(&form.search_term).await?))
}

pub async fn show_artist(
    State(app_state): State<Arc<AppState>>,
    IdPath(artist_id): IdPath,
) -> Result<Json<ArtistDetail>, ListingError> {
    let service = ArtistService::new(app_state.db.clone());
    Ok(Json(service.detail(artist_id, Utc::now()).await?))
}

pub async fn create_artist(
    State(app_state): State<Arc<AppState>>,
    FormInput(form): FormInput<ArtistForm>,
) -> Result<(StatusCode, Json<WriteResponse>), ListingError> {
    let service = ArtistService::new(app_state.db.clone());
    let artist = service.create(form.into()).await?;

    Ok(created(
        format!("Artist '{}' was successfully listed!", artist.name),
        artist.id,
    ))
}

pub async fn edit_artist(
    State(app_state): State<Arc<AppState>>,
    IdPath(artist_id): IdPath,
) -> Result<Json<ArtistProfile>, ListingError> {
    let service = ArtistService::new(app_state.db.clone());
    Ok(Json(service.profile(artist_id).await?))
}

pub async fn update_artist(
    State(app_state): State<Arc<AppState>>,
    IdPath(artist_id): IdPath,
    FormInput(form): FormInput<ArtistForm>,
) -> Result<Json<WriteResponse>, ListingError> {
    let service = ArtistService::new(app_state.db.clone());
    let artist = service.update(artist_id, form.into()).await?;

    Ok(done(format!(
        "Artist '{}' was successfully updated!",
        artist.name
    )))
}

pub async fn delete_artist(
    State(app_state): State<Arc<AppState>>,
    IdPath(artist_id): IdPath,
) -> Result<Json<WriteResponse>, ListingError> {
    let service = ArtistService::new(app_state.db.clone());
    service.delete(artist_id).await?;

    Ok(done(format!("Artist {} was successfully deleted.", artist_id)))
}
