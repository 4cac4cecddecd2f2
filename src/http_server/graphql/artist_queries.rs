use async_graphql::{Context, Object, SimpleObject};
use chrono::{DateTime, Utc};

use crate::http_server::graphql::context::get_app_state;
use crate::http_server::graphql::search::SearchResponse;
use crate::http_server::graphql_error::GraphqlResult;
use crate::services::artist::{
    ArtistDetail, ArtistProfile, ArtistService, ArtistSummary, ShowWithVenue,
};

#[derive(Debug, Clone, SimpleObject)]
pub struct ArtistListItem {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct ArtistWithShows {
    pub artist: Artist,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: i64,
    pub upcoming_shows_count: i64,
}

impl From<ArtistSummary> for ArtistListItem {
    fn from(artist: ArtistSummary) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
        }
    }
}

impl From<ArtistProfile> for Artist {
    fn from(artist: ArtistProfile) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            genres: artist.genres.into_vec(),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
        }
    }
}

impl From<ShowWithVenue> for ArtistShow {
    fn from(show: ShowWithVenue) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            venue_image_link: show.venue_image_link,
            start_time: show.start_time,
        }
    }
}

impl From<ArtistDetail> for ArtistWithShows {
    fn from(detail: ArtistDetail) -> Self {
        Self {
            artist: detail.artist.into(),
            past_shows: detail.past_shows.into_iter().map(Into::into).collect(),
            upcoming_shows: detail.upcoming_shows.into_iter().map(Into::into).collect(),
            past_shows_count: detail.past_shows_count as i64,
            upcoming_shows_count: detail.upcoming_shows_count as i64,
        }
    }
}

#[derive(Default)]
pub struct ArtistQuery;

#[Object]
impl ArtistQuery {
    async fn artists(&self, ctx: &Context<'_>) -> GraphqlResult<Vec<ArtistListItem>> {
        let db = &get_app_state(ctx)?.db;
        let service = ArtistService::new(db.clone());
        let artists = service.list().await?;

        Ok(artists.into_iter().map(Into::into).collect())
    }

    async fn artist(&self, ctx: &Context<'_>, id: i64) -> GraphqlResult<ArtistWithShows> {
        let db = &get_app_state(ctx)?.db;
        let service = ArtistService::new(db.clone());

        Ok(service.detail(id, Utc::now()).await?.into())
    }

    async fn search_artists(
        &self,
        ctx: &Context<'_>,
        search_term: String,
    ) -> GraphqlResult<SearchResponse> {
        let db = &get_app_state(ctx)?.db;
        let service = ArtistService::new(db.clone());

        Ok(service.search(&search_term).await?.into())
    }
}
