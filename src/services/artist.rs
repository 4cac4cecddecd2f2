use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;

use crate::database::Database;
use crate::entities::{artist, show, venue};
use crate::genres::Genres;
use crate::services::error::{ListingError, ListingResult};
use crate::services::forms::{NewArtist, ValidProfile};
use crate::services::schedule::Schedule;
use crate::services::{PLACEHOLDER_NAME, SearchResults, UNKNOWN_CITY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistProfile {
    pub id: i64,
    pub name: String,
    pub genres: Genres,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: String,
}

impl From<artist::Model> for ArtistProfile {
    fn from(model: artist::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            genres: Genres::from_storage(&model.genres),
            city: model.city,
            state: model.state,
            phone: model.phone,
            website: model.website_link,
            facebook_link: model.facebook_link,
            seeking_venue: model.seeking,
            seeking_description: model.seeking_comment,
            image_link: model.image_link,
        }
    }
}

/// A show by the artist, with the hosting venue resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowWithVenue {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: ArtistProfile,
    pub past_shows: Vec<ShowWithVenue>,
    pub upcoming_shows: Vec<ShowWithVenue>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

pub struct ArtistService {
    db: Arc<Database>,
}

impl ArtistService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every artist outside the unknown city, ordered by id.
    pub async fn list(&self) -> ListingResult<Vec<ArtistSummary>> {
        let rows = artist::Entity::find()
            .select_only()
            .column(artist::Column::Id)
            .column(artist::Column::Name)
            .filter(artist::Column::City.ne(UNKNOWN_CITY))
            .order_by_asc(artist::Column::Id)
            .into_tuple::<(i64, String)>()
            .all(&self.db.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| ArtistSummary { id, name })
            .collect())
    }

    /// Case-insensitive substring search on artist names.
    pub async fn search(&self, term: &str) -> ListingResult<SearchResults> {
        let rows = artist::Entity::find()
            .select_only()
            .column(artist::Column::Id)
            .column(artist::Column::Name)
            .filter(artist::Column::Name.ne(PLACEHOLDER_NAME))
            .order_by_asc(artist::Column::Id)
            .into_tuple::<(i64, String)>()
            .all(&self.db.conn)
            .await?;

        let results = SearchResults::matching(rows, term);
        log::debug!("Artist search '{}' matched {}", term, results.count);
        Ok(results)
    }

    pub async fn profile(&self, id: i64) -> ListingResult<ArtistProfile> {
        let artist = artist::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?
            .ok_or_else(|| ListingError::not_found("Artist", id))?;

        Ok(artist.into())
    }

    /// The artist with its shows split into past and upcoming relative to `now`.
    pub async fn detail(&self, id: i64, now: DateTime<Utc>) -> ListingResult<ArtistDetail> {
        let artist = artist::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?
            .ok_or_else(|| ListingError::not_found("Artist", id))?;

        let shows = show::Entity::find()
            .filter(show::Column::ArtistId.eq(id))
            .find_also_related(venue::Entity)
            .all(&self.db.conn)
            .await?
            .into_iter()
            .map(|(show, venue)| {
                venue.map(|venue| (show.date, venue)).ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "Venue {} of show {} not found",
                        show.venue_id, show.id
                    ))
                })
            })
            .collect::<Result<Vec<_>, DbErr>>()?;

        let schedule = Schedule::partition(shows, now, |start_time, venue| ShowWithVenue {
            venue_id: venue.id,
            venue_name: venue.name,
            venue_image_link: venue.image_link,
            start_time,
        });

        Ok(ArtistDetail {
            artist: artist.into(),
            past_shows_count: schedule.past.len(),
            upcoming_shows_count: schedule.upcoming.len(),
            past_shows: schedule.past,
            upcoming_shows: schedule.upcoming,
        })
    }

    pub async fn create(&self, artist: NewArtist) -> ListingResult<ArtistProfile> {
        let valid = artist.validate().inspect_err(|e| {
            log::warn!("Artist could not be listed: {}", e);
        })?;

        let mut model = artist::ActiveModel::new();
        apply_artist(&mut model, valid);

        let created = self
            .db
            .conn
            .transaction::<_, artist::Model, ListingError>(|txn| {
                Box::pin(async move { Ok(model.insert(txn).await?) })
            })
            .await
            .map_err(ListingError::from)
            .inspect_err(|e| log::error!("An error occurred. Artist could not be listed: {}", e))?;

        log::info!(
            "Artist '{}' was successfully listed (ID: {})",
            created.name,
            created.id
        );
        Ok(created.into())
    }

    pub async fn update(&self, id: i64, artist: NewArtist) -> ListingResult<ArtistProfile> {
        let valid = artist.validate()?;

        let updated = self
            .db
            .conn
            .transaction::<_, artist::Model, ListingError>(|txn| {
                Box::pin(async move {
                    let existing = artist::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ListingError::not_found("Artist", id))?;

                    let mut model: artist::ActiveModel = existing.into();
                    apply_artist(&mut model, valid);
                    Ok(model.update(txn).await?)
                })
            })
            .await
            .map_err(ListingError::from)
            .inspect_err(|e| log::warn!("Artist {} could not be updated: {}", id, e))?;

        log::info!("Artist '{}' updated (ID: {})", updated.name, updated.id);
        Ok(updated.into())
    }

    /// Delete an artist. Fails without changing anything while shows still
    /// reference it. Deleting an id that does not exist succeeds.
    pub async fn delete(&self, id: i64) -> ListingResult<()> {
        let deleted = self
            .db
            .conn
            .transaction::<_, u64, ListingError>(|txn| {
                Box::pin(async move {
                    let dependents = show::Entity::find()
                        .filter(show::Column::ArtistId.eq(id))
                        .count(txn)
                        .await?;
                    if dependents > 0 {
                        return Err(ListingError::ConstraintViolation(format!(
                            "Artist {} still has {} show(s)",
                            id, dependents
                        )));
                    }

                    let result = artist::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected)
                })
            })
            .await
            .map_err(ListingError::from)
            .inspect_err(|e| log::warn!("Artist {} could not be deleted: {}", id, e))?;

        if deleted == 0 {
            log::warn!("Artist {} did not exist, nothing deleted", id);
        } else {
            log::info!("Artist {} successfully deleted", id);
        }
        Ok(())
    }
}

fn apply_artist(model: &mut artist::ActiveModel, profile: ValidProfile) {
    model.name = Set(profile.name);
    model.city = Set(profile.city);
    model.state = Set(profile.state);
    model.phone = Set(profile.phone);
    model.image_link = Set(profile.image_link);
    model.website_link = Set(profile.website_link);
    model.facebook_link = Set(profile.facebook_link);
    model.genres = Set(profile.genres.to_storage());
    model.seeking = Set(profile.seeking);
    model.seeking_comment = Set(profile.seeking_comment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::forms::NewShow;
    use crate::services::show::ShowService;
    use crate::services::venue::VenueService;
    use crate::test_utils::{new_artist, new_venue, test_db};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 15, 20, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_list_skips_unknown_city() {
        let db = test_db().await;
        let service = ArtistService::new(db);

        let petals = service.create(new_artist("Guns N Petals")).await.unwrap();
        let mut placeholder = new_artist("TBD");
        placeholder.city = UNKNOWN_CITY.into();
        service.create(placeholder).await.unwrap();
        let sax = service.create(new_artist("The Wild Sax Band")).await.unwrap();

        let artists = service.list().await.unwrap();
        assert_eq!(
            artists,
            vec![
                ArtistSummary {
                    id: petals.id,
                    name: "Guns N Petals".into()
                },
                ArtistSummary {
                    id: sax.id,
                    name: "The Wild Sax Band".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_search_matches_substring_and_skips_placeholder() {
        let db = test_db().await;
        let service = ArtistService::new(db);

        service.create(new_artist("Guns N Petals")).await.unwrap();
        service.create(new_artist("Matt Quevedo")).await.unwrap();
        service.create(new_artist("The Wild Sax Band")).await.unwrap();
        service.create(new_artist("TBD")).await.unwrap();

        let results = service.search("A").await.unwrap();
        let names: Vec<&str> = results.data.iter().map(|hit| hit.name.as_str()).collect();
        assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
        assert_eq!(results.count, 3);

        let results = service.search("band").await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Wild Sax Band");

        let results = service.search("tbd").await.unwrap();
        assert_eq!(results.count, 0);
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let db = test_db().await;
        let service = ArtistService::new(db);

        service.create(new_artist("Sigur Rós")).await.unwrap();
        service.create(new_artist("Björk")).await.unwrap();

        let results = service.search("RÓS").await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "Sigur Rós");

        let results = service.search("BJÖRK").await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "Björk");
    }

    #[tokio::test]
    async fn test_detail_resolves_venue_for_each_show() {
        let db = test_db().await;
        let service = ArtistService::new(db.clone());
        let venues = VenueService::new(db.clone());
        let shows = ShowService::new(db.clone());

        let artist = service.create(new_artist("Guns N Petals")).await.unwrap();
        let hop = venues.create(new_venue("The Hop", "SF", "CA")).await.unwrap();
        let park = venues.create(new_venue("Park Square", "SF", "CA")).await.unwrap();

        for (venue_id, date) in [
            (hop.id, now() - Duration::days(30)),
            (park.id, now() + Duration::days(4)),
        ] {
            shows
                .create(NewShow {
                    artist_id: Some(artist.id),
                    venue_id: Some(venue_id),
                    start_time: Some(date),
                })
                .await
                .unwrap();
        }

        let detail = service.detail(artist.id, now()).await.unwrap();
        assert_eq!(detail.artist.name, "Guns N Petals");
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 1);

        assert_eq!(detail.past_shows[0].venue_id, hop.id);
        assert_eq!(detail.past_shows[0].venue_name, "The Hop");
        assert_eq!(detail.upcoming_shows[0].venue_id, park.id);
        assert_eq!(detail.upcoming_shows[0].venue_name, "Park Square");
        assert_eq!(detail.upcoming_shows[0].venue_image_link, park.image_link);
    }

    #[tokio::test]
    async fn test_detail_missing_artist_is_not_found() {
        let db = test_db().await;
        let service = ArtistService::new(db);

        let err = service.detail(3, now()).await.unwrap_err();
        assert!(matches!(err, ListingError::NotFound { entity: "Artist", id: 3 }));
    }

    #[tokio::test]
    async fn test_update_and_profile() {
        let db = test_db().await;
        let service = ArtistService::new(db);

        let artist = service.create(new_artist("Guns N Petals")).await.unwrap();
        let mut changes = new_artist("Guns N Petals");
        changes.seeking_venue = true;
        changes.seeking_description =
            Some("Looking for shows to perform at in the San Francisco Bay Area!".into());
        changes.website_link = Some("https://www.gunsnpetalsband.com".into());

        service.update(artist.id, changes).await.unwrap();

        let profile = service.profile(artist.id).await.unwrap();
        assert!(profile.seeking_venue);
        assert_eq!(
            profile.website.as_deref(),
            Some("https://www.gunsnpetalsband.com")
        );
    }

    #[tokio::test]
    async fn test_delete_blocked_by_shows() {
        let db = test_db().await;
        let service = ArtistService::new(db.clone());
        let venues = VenueService::new(db.clone());
        let shows = ShowService::new(db.clone());

        let artist = service.create(new_artist("Guns N Petals")).await.unwrap();
        let venue = venues.create(new_venue("The Hop", "SF", "CA")).await.unwrap();
        let show = shows
            .create(NewShow {
                artist_id: Some(artist.id),
                venue_id: Some(venue.id),
                start_time: Some(now()),
            })
            .await
            .unwrap();

        let err = service.delete(artist.id).await.unwrap_err();
        assert!(matches!(err, ListingError::ConstraintViolation(_)));
        assert!(service.profile(artist.id).await.is_ok());

        // Once the show is gone the artist can be deleted
        shows.delete(show.id).await.unwrap();
        service.delete(artist.id).await.unwrap();
        assert!(matches!(
            service.profile(artist.id).await,
            Err(ListingError::NotFound { .. })
        ));
    }
}
