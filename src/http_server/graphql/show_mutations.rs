use async_graphql::{Context, Object};
use chrono::{DateTime, Utc};

use crate::http_server::graphql::context::get_app_state;
use crate::http_server::graphql::show_queries::ListedShow;
use crate::http_server::graphql_error::GraphqlResult;
use crate::services::forms::NewShow;
use crate::services::show::ShowService;

#[derive(Default)]
pub struct ShowMutation;

#[Object]
impl ShowMutation {
    async fn create_show(
        &self,
        ctx: &Context<'_>,
        artist_id: i64,
        venue_id: i64,
        start_time: Option<DateTime<Utc>>,
    ) -> GraphqlResult<ListedShow> {
        let db = &get_app_state(ctx)?.db;
        let service = ShowService::new(db.clone());
        let show = service
            .create(NewShow {
                artist_id: Some(artist_id),
                venue_id: Some(venue_id),
                start_time,
            })
            .await?;

        Ok(show.into())
    }

    async fn delete_show(&self, ctx: &Context<'_>, id: i64) -> GraphqlResult<bool> {
        let db = &get_app_state(ctx)?.db;
        let service = ShowService::new(db.clone());
        service.delete(id).await?;
        Ok(true)
    }
}
