use async_graphql::SimpleObject;

use crate::services::{SearchHit, SearchResults};

#[derive(Debug, Clone, SimpleObject)]
pub struct SearchHitObject {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct SearchResponse {
    pub count: i64,
    pub data: Vec<SearchHitObject>,
}

impl From<SearchHit> for SearchHitObject {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.id,
            name: hit.name,
            num_upcoming_shows: hit.num_upcoming_shows as i64,
        }
    }
}

impl From<SearchResults> for SearchResponse {
    fn from(results: SearchResults) -> Self {
        Self {
            count: results.count as i64,
            data: results.data.into_iter().map(Into::into).collect(),
        }
    }
}
