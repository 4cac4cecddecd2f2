use async_graphql::{Context, Object, SimpleObject};
use chrono::{DateTime, Utc};

use crate::http_server::graphql::context::get_app_state;
use crate::http_server::graphql::search::SearchResponse;
use crate::http_server::graphql_error::GraphqlResult;
use crate::services::venue::{
    ShowWithArtist, VenueArea, VenueDetail, VenueProfile, VenueService, VenueSummary,
};

#[derive(Debug, Clone, SimpleObject)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct AreaVenue {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct VenueWithShows {
    pub venue: Venue,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: i64,
    pub upcoming_shows_count: i64,
}

impl From<VenueSummary> for AreaVenue {
    fn from(venue: VenueSummary) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows: venue.num_upcoming_shows as i64,
        }
    }
}

impl From<VenueArea> for Area {
    fn from(area: VenueArea) -> Self {
        Self {
            city: area.city,
            state: area.state,
            venues: area.venues.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<VenueProfile> for Venue {
    fn from(venue: VenueProfile) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            genres: venue.genres.into_vec(),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
        }
    }
}

impl From<ShowWithArtist> for VenueShow {
    fn from(show: ShowWithArtist) -> Self {
        Self {
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: show.start_time,
        }
    }
}

impl From<VenueDetail> for VenueWithShows {
    fn from(detail: VenueDetail) -> Self {
        Self {
            venue: detail.venue.into(),
            past_shows: detail.past_shows.into_iter().map(Into::into).collect(),
            upcoming_shows: detail.upcoming_shows.into_iter().map(Into::into).collect(),
            past_shows_count: detail.past_shows_count as i64,
            upcoming_shows_count: detail.upcoming_shows_count as i64,
        }
    }
}

#[derive(Default)]
pub struct VenueQuery;

#[Object]
impl VenueQuery {
    /// Venues grouped by city and state.
    async fn venue_areas(&self, ctx: &Context<'_>) -> GraphqlResult<Vec<Area>> {
        let db = &get_app_state(ctx)?.db;
        let service = VenueService::new(db.clone());
        let areas = service.list_areas(Utc::now()).await?;

        Ok(areas.into_iter().map(Into::into).collect())
    }

    async fn venue(&self, ctx: &Context<'_>, id: i64) -> GraphqlResult<VenueWithShows> {
        let db = &get_app_state(ctx)?.db;
        let service = VenueService::new(db.clone());

        Ok(service.detail(id, Utc::now()).await?.into())
    }

    async fn search_venues(
        &self,
        ctx: &Context<'_>,
        search_term: String,
    ) -> GraphqlResult<SearchResponse> {
        let db = &get_app_state(ctx)?.db;
        let service = VenueService::new(db.clone());

        Ok(service.search(&search_term).await?.into())
    }
}
