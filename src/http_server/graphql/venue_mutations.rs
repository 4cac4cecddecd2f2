use async_graphql::{Context, InputObject, Object};

use crate::http_server::graphql::context::get_app_state;
use crate::http_server::graphql::venue_queries::Venue;
use crate::http_server::graphql_error::GraphqlResult;
use crate::services::forms::NewVenue;
use crate::services::venue::VenueService;

#[derive(Debug, Clone, InputObject)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    #[graphql(default)]
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<VenueInput> for NewVenue {
    fn from(input: VenueInput) -> Self {
        Self {
            name: input.name,
            city: input.city,
            state: input.state,
            address: input.address,
            phone: input.phone,
            image_link: input.image_link,
            website_link: input.website_link,
            facebook_link: input.facebook_link,
            genres: input.genres,
            seeking_talent: input.seeking_talent,
            seeking_description: input.seeking_description,
        }
    }
}

#[derive(Default)]
pub struct VenueMutation;

#[Object]
impl VenueMutation {
    async fn create_venue(&self, ctx: &Context<'_>, input: VenueInput) -> GraphqlResult<Venue> {
        let db = &get_app_state(ctx)?.db;
        let service = VenueService::new(db.clone());

        Ok(service.create(input.into()).await?.into())
    }

    async fn update_venue(
        &self,
        ctx: &Context<'_>,
        id: i64,
        input: VenueInput,
    ) -> GraphqlResult<Venue> {
        let db = &get_app_state(ctx)?.db;
        let service = VenueService::new(db.clone());

        Ok(service.update(id, input.into()).await?.into())
    }

    async fn delete_venue(&self, ctx: &Context<'_>, id: i64) -> GraphqlResult<bool> {
        let db = &get_app_state(ctx)?.db;
        let service = VenueService::new(db.clone());
        service.delete(id).await?;
        Ok(true)
    }
}
