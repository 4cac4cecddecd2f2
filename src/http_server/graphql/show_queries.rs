use async_graphql::{Context, Object, SimpleObject};
use chrono::{DateTime, Utc};

use crate::entities::show;
use crate::http_server::graphql::context::get_app_state;
use crate::http_server::graphql_error::GraphqlResult;
use crate::services::show::{ShowListing, ShowService};

#[derive(Debug, Clone, SimpleObject)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: Option<DateTime<Utc>>,
}

/// A newly listed show, before its names are resolved.
#[derive(Debug, Clone, SimpleObject)]
pub struct ListedShow {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: Option<DateTime<Utc>>,
}

impl From<ShowListing> for Show {
    fn from(show: ShowListing) -> Self {
        Self {
            id: show.id,
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: show.start_time,
        }
    }
}

impl From<show::Model> for ListedShow {
    fn from(show: show::Model) -> Self {
        Self {
            id: show.id,
            artist_id: show.artist_id,
            venue_id: show.venue_id,
            start_time: show.date,
        }
    }
}

#[derive(Default)]
pub struct ShowQuery;

#[Object]
impl ShowQuery {
    async fn shows(&self, ctx: &Context<'_>) -> GraphqlResult<Vec<Show>> {
        let db = &get_app_state(ctx)?.db;
        let service = ShowService::new(db.clone());
        let shows = service.list().await?;

        Ok(shows.into_iter().map(Into::into).collect())
    }
}
