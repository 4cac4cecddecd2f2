use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use crate::database::Database;
use crate::entities::{artist, show, venue};
use crate::services::error::{ListingError, ListingResult};
use crate::services::forms::NewShow;

/// A show with both sides resolved, as shown on the show listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: Option<DateTime<Utc>>,
}

pub struct ShowService {
    db: Arc<Database>,
}

impl ShowService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All shows ordered by id.
    pub async fn list(&self) -> ListingResult<Vec<ShowListing>> {
        let shows = show::Entity::find()
            .order_by_asc(show::Column::Id)
            .all(&self.db.conn)
            .await?;

        if shows.is_empty() {
            return Ok(Vec::new());
        }

        let artist_ids: Vec<i64> = shows.iter().map(|show| show.artist_id).collect();
        let venue_ids: Vec<i64> = shows.iter().map(|show| show.venue_id).collect();

        let artists: HashMap<i64, artist::Model> = artist::Entity::find()
            .filter(artist::Column::Id.is_in(artist_ids))
            .all(&self.db.conn)
            .await?
            .into_iter()
            .map(|artist| (artist.id, artist))
            .collect();
        let venues: HashMap<i64, String> = venue::Entity::find()
            .filter(venue::Column::Id.is_in(venue_ids))
            .all(&self.db.conn)
            .await?
            .into_iter()
            .map(|venue| (venue.id, venue.name))
            .collect();

        shows
            .into_iter()
            .map(|show| {
                let artist = artist_for(&artists, &show)?;
                let venue_name = venues.get(&show.venue_id).ok_or_else(|| {
                    ListingError::not_found("Venue", show.venue_id)
                })?;

                Ok(ShowListing {
                    id: show.id,
                    venue_id: show.venue_id,
                    venue_name: venue_name.clone(),
                    artist_id: show.artist_id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.date,
                })
            })
            .collect()
    }

    /// List a new show. The artist and venue must both exist.
    pub async fn create(&self, show: NewShow) -> ListingResult<show::Model> {
        let valid = show.validate().inspect_err(|e| {
            log::warn!("Show could not be listed: {}", e);
        })?;

        let created = self
            .db
            .conn
            .transaction::<_, show::Model, ListingError>(|txn| {
                Box::pin(async move {
                    if artist::Entity::find_by_id(valid.artist_id)
                        .one(txn)
                        .await?
                        .is_none()
                    {
                        return Err(ListingError::validation(format!(
                            "Artist {} does not exist",
                            valid.artist_id
                        )));
                    }
                    if venue::Entity::find_by_id(valid.venue_id)
                        .one(txn)
                        .await?
                        .is_none()
                    {
                        return Err(ListingError::validation(format!(
                            "Venue {} does not exist",
                            valid.venue_id
                        )));
                    }

                    let model = show::ActiveModel {
                        artist_id: Set(valid.artist_id),
                        venue_id: Set(valid.venue_id),
                        date: Set(valid.start_time),
                        ..Default::default()
                    };
                    Ok(model.insert(txn).await?)
                })
            })
            .await
            .map_err(ListingError::from)
            .inspect_err(|e| log::error!("An error occurred. Show could not be listed: {}", e))?;

        log::info!(
            "Show was successfully listed (ID: {}, artist {}, venue {})",
            created.id,
            created.artist_id,
            created.venue_id
        );
        Ok(created)
    }

    /// Delete a show. Deleting an id that does not exist succeeds.
    pub async fn delete(&self, id: i64) -> ListingResult<()> {
        let deleted = self
            .db
            .conn
            .transaction::<_, u64, ListingError>(|txn| {
                Box::pin(async move {
                    let result = show::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected)
                })
            })
            .await
            .map_err(ListingError::from)?;

        if deleted == 0 {
            log::warn!("Show {} did not exist, nothing deleted", id);
        } else {
            log::info!("Show {} successfully deleted", id);
        }
        Ok(())
    }
}

fn artist_for<'a>(
    artists: &'a HashMap<i64, artist::Model>,
    show: &show::Model,
) -> ListingResult<&'a artist::Model> {
    artists
        .get(&show.artist_id)
        .ok_or_else(|| ListingError::not_found("Artist", show.artist_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::artist::ArtistService;
    use crate::services::venue::VenueService;
    use crate::test_utils::{new_artist, new_venue, test_db};
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = test_db().await;
        let service = ShowService::new(db.clone());
        let venue = VenueService::new(db.clone())
            .create(new_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let artist = ArtistService::new(db.clone())
            .create(new_artist("Guns N Petals"))
            .await
            .unwrap();

        let show = service
            .create(NewShow {
                artist_id: Some(artist.id),
                venue_id: Some(venue.id),
                start_time: Some(start()),
            })
            .await
            .unwrap();
        let undated = service
            .create(NewShow {
                artist_id: Some(artist.id),
                venue_id: Some(venue.id),
                start_time: None,
            })
            .await
            .unwrap();

        let shows = service.list().await.unwrap();
        assert_eq!(
            shows,
            vec![
                ShowListing {
                    id: show.id,
                    venue_id: venue.id,
                    venue_name: "The Musical Hop".into(),
                    artist_id: artist.id,
                    artist_name: "Guns N Petals".into(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: Some(start()),
                },
                ShowListing {
                    id: undated.id,
                    venue_id: venue.id,
                    venue_name: "The Musical Hop".into(),
                    artist_id: artist.id,
                    artist_name: "Guns N Petals".into(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_empty() {
        let db = test_db().await;
        assert!(ShowService::new(db).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_references() {
        let db = test_db().await;
        let service = ShowService::new(db.clone());
        let venue = VenueService::new(db.clone())
            .create(new_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();

        let err = service
            .create(NewShow {
                artist_id: Some(42),
                venue_id: Some(venue.id),
                start_time: Some(start()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::Validation(_)));
        assert!(err.to_string().contains("Artist 42"));

        let err = service
            .create(NewShow {
                artist_id: None,
                venue_id: Some(venue.id),
                start_time: Some(start()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::Validation(_)));

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_show() {
        let db = test_db().await;
        let service = ShowService::new(db.clone());
        let venue = VenueService::new(db.clone())
            .create(new_venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let artist = ArtistService::new(db.clone())
            .create(new_artist("Guns N Petals"))
            .await
            .unwrap();
        let show = service
            .create(NewShow {
                artist_id: Some(artist.id),
                venue_id: Some(venue.id),
                start_time: Some(start()),
            })
            .await
            .unwrap();

        service.delete(show.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());

        // Already gone
        service.delete(show.id).await.unwrap();
    }
}
