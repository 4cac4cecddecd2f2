use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;

use crate::database::Database;
use crate::entities::{artist, show, venue};
use crate::genres::Genres;
use crate::services::error::{ListingError, ListingResult};
use crate::services::forms::{NewVenue, ValidVenue};
use crate::services::schedule::Schedule;
use crate::services::{PLACEHOLDER_NAME, SearchResults, UNKNOWN_CITY};

/// All venues sharing one exact `(city, state)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// Everything about a venue except its shows. Also the edit form's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueProfile {
    pub id: i64,
    pub name: String,
    pub genres: Genres,
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

impl From<venue::Model> for VenueProfile {
    fn from(model: venue::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            genres: Genres::from_storage(&model.genres),
            address: model.address,
            city: model.city,
            state: model.state,
            phone: model.phone,
            website: model.website_link,
            facebook_link: model.facebook_link,
            seeking_talent: model.seeking,
            seeking_description: model.seeking_comment,
            image_link: model.image_link,
        }
    }
}

/// A show at the venue, with the performing artist resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowWithArtist {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: VenueProfile,
    pub past_shows: Vec<ShowWithArtist>,
    pub upcoming_shows: Vec<ShowWithArtist>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

pub struct VenueService {
    db: Arc<Database>,
}

impl VenueService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Group venues by `(city, state)` and count each venue's shows starting
    /// after `now`.
    ///
    /// Areas appear in the order their first venue was created; venues
    /// within an area are ordered by id. Venues in the unknown city are left out.
    pub async fn list_areas(&self, now: DateTime<Utc>) -> ListingResult<Vec<VenueArea>> {
        let venues = venue::Entity::find()
            .filter(venue::Column::City.ne(UNKNOWN_CITY))
            .order_by_asc(venue::Column::Id)
            .all(&self.db.conn)
            .await?;

        let upcoming = upcoming_show_counts(&self.db.conn, now).await?;

        let mut areas: Vec<VenueArea> = Vec::new();
        let mut area_index: HashMap<(String, String), usize> = HashMap::new();

        for venue in venues {
            let summary = VenueSummary {
                id: venue.id,
                num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
                name: venue.name,
            };

            let key = (venue.city, venue.state);
            if let Some(&index) = area_index.get(&key) {
                areas[index].venues.push(summary);
                continue;
            }

            area_index.insert(key.clone(), areas.len());
            areas.push(VenueArea {
                city: key.0,
                state: key.1,
                venues: vec![summary],
            });
        }

        log::debug!("Listed {} venue area(s)", areas.len());
        Ok(areas)
    }

    /// Case-insensitive substring search on venue names.
    pub async fn search(&self, term: &str) -> ListingResult<SearchResults> {
        let rows = venue::Entity::find()
            .select_only()
            .column(venue::Column::Id)
            .column(venue::Column::Name)
            .filter(venue::Column::Name.ne(PLACEHOLDER_NAME))
            .order_by_asc(venue::Column::Id)
            .into_tuple::<(i64, String)>()
            .all(&self.db.conn)
            .await?;

        let results = SearchResults::matching(rows, term);
        log::debug!("Venue search '{}' matched {}", term, results.count);
        Ok(results)
    }

    pub async fn profile(&self, id: i64) -> ListingResult<VenueProfile> {
        let venue = venue::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?
            .ok_or_else(|| ListingError::not_found("Venue", id))?;

        Ok(venue.into())
    }

    /// The venue with its shows split into past and upcoming relative to `now`.
    pub async fn detail(&self, id: i64, now: DateTime<Utc>) -> ListingResult<VenueDetail> {
        let venue = venue::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?
            .ok_or_else(|| ListingError::not_found("Venue", id))?;

        let shows = show::Entity::find()
            .filter(show::Column::VenueId.eq(id))
            .find_also_related(artist::Entity)
            .all(&self.db.conn)
            .await?;

        let shows = shows
            .into_iter()
            .map(|(show, artist)| {
                artist.map(|artist| (show.date, artist)).ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "Artist {} of show {} not found",
                        show.artist_id, show.id
                    ))
                })
            })
            .collect::<Result<Vec<_>, DbErr>>()?;

        let schedule = Schedule::partition(shows, now, |start_time, artist| ShowWithArtist {
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time,
        });

        Ok(VenueDetail {
            venue: venue.into(),
            past_shows_count: schedule.past.len(),
            upcoming_shows_count: schedule.upcoming.len(),
            past_shows: schedule.past,
            upcoming_shows: schedule.upcoming,
        })
    }

    pub async fn create(&self, venue: NewVenue) -> ListingResult<VenueProfile> {
        let valid = venue.validate().inspect_err(|e| {
            log::warn!("Venue could not be listed: {}", e);
        })?;

        let mut model = venue::ActiveModel::new();
        apply_venue(&mut model, valid);

        let result = self
            .db
            .conn
            .transaction::<_, venue::Model, ListingError>(|txn| {
                Box::pin(async move { Ok(model.insert(txn).await?) })
            })
            .await
            .map_err(ListingError::from);

        match result {
            Ok(created) => {
                log::info!(
                    "Venue '{}' was successfully listed (ID: {})",
                    created.name,
                    created.id
                );
                Ok(created.into())
            }
            Err(e) => {
                log::error!("An error occurred. Venue could not be listed: {}", e);
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: i64, venue: NewVenue) -> ListingResult<VenueProfile> {
        let valid = venue.validate()?;

        let updated = self
            .db
            .conn
            .transaction::<_, venue::Model, ListingError>(|txn| {
                Box::pin(async move {
                    let existing = venue::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ListingError::not_found("Venue", id))?;

                    let mut model: venue::ActiveModel = existing.into();
                    apply_venue(&mut model, valid);
                    Ok(model.update(txn).await?)
                })
            })
            .await
            .map_err(ListingError::from)
            .inspect_err(|e| log::warn!("Venue {} could not be updated: {}", id, e))?;

        log::info!("Venue '{}' updated (ID: {})", updated.name, updated.id);
        Ok(updated.into())
    }

    /// Delete a venue. Fails without changing anything while shows still
    /// reference it. Deleting an id that does not exist succeeds.
    pub async fn delete(&self, id: i64) -> ListingResult<()> {
        let deleted = self
            .db
            .conn
            .transaction::<_, u64, ListingError>(|txn| {
                Box::pin(async move {
                    let dependents = show::Entity::find()
                        .filter(show::Column::VenueId.eq(id))
                        .count(txn)
                        .await?;
                    if dependents > 0 {
                        return Err(ListingError::ConstraintViolation(format!(
                            "Venue {} still has {} show(s)",
                            id, dependents
                        )));
                    }

                    let result = venue::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected)
                })
            })
            .await
            .map_err(ListingError::from)
            .inspect_err(|e| log::warn!("Venue {} could not be deleted: {}", id, e))?;

        if deleted == 0 {
            log::warn!("Venue {} did not exist, nothing deleted", id);
        } else {
            log::info!("Venue {} successfully deleted", id);
        }
        Ok(())
    }
}

fn apply_venue(model: &mut venue::ActiveModel, valid: ValidVenue) {
    let profile = valid.profile;
    model.name = Set(profile.name);
    model.city = Set(profile.city);
    model.state = Set(profile.state);
    model.address = Set(valid.address);
    model.phone = Set(profile.phone);
    model.image_link = Set(profile.image_link);
    model.website_link = Set(profile.website_link);
    model.facebook_link = Set(profile.facebook_link);
    model.genres = Set(profile.genres.to_storage());
    model.seeking = Set(profile.seeking);
    model.seeking_comment = Set(profile.seeking_comment);
}

/// Number of shows per venue starting strictly after `now`.
async fn upcoming_show_counts<C>(conn: &C, now: DateTime<Utc>) -> ListingResult<HashMap<i64, u64>>
where
    C: ConnectionTrait,
{
    let rows = show::Entity::find()
        .select_only()
        .column(show::Column::VenueId)
        .column_as(show::Column::Id.count(), "upcoming")
        .filter(show::Column::Date.gt(now))
        .group_by(show::Column::VenueId)
        .into_tuple::<(i64, i64)>()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(venue_id, count)| (venue_id, count as u64))
        .collect())
}
