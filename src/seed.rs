use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use color_eyre::Result;
use color_eyre::eyre::Context;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::database::Database;
use crate::entities::venue;
use crate::services::artist::ArtistService;
use crate::services::forms::{NewArtist, NewShow, NewVenue};
use crate::services::show::ShowService;
use crate::services::venue::VenueService;

/// What a seed run inserted.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

/// Load the demo venues, artists and shows. Does nothing when the database
/// already has venues.
pub async fn seed_demo_data(db: Arc<Database>) -> Result<SeedSummary> {
    let existing = venue::Entity::find()
        .count(&db.conn)
        .await
        .wrap_err("Failed to count venues")?;
    if existing > 0 {
        log::info!("Database already has {} venue(s), skipping seed", existing);
        return Ok(SeedSummary::default());
    }

    let venues = VenueService::new(db.clone());
    let artists = ArtistService::new(db.clone());
    let shows = ShowService::new(db.clone());
    let mut summary = SeedSummary::default();

    let mut venue_ids = Vec::new();
    for venue in demo_venues() {
        let name = venue.name.clone();
        let created = venues
            .create(venue)
            .await
            .wrap_err_with(|| format!("Failed to seed venue '{}'", name))?;
        venue_ids.push(created.id);
        summary.venues += 1;
    }

    let mut artist_ids = Vec::new();
    for artist in demo_artists() {
        let name = artist.name.clone();
        let created = artists
            .create(artist)
            .await
            .wrap_err_with(|| format!("Failed to seed artist '{}'", name))?;
        artist_ids.push(created.id);
        summary.artists += 1;
    }

    // (venue index, artist index, start time)
    let schedule: [(usize, usize, DateTime<Utc>); 5] = [
        (0, 0, at(2019, 5, 21, 21, 30)),
        (2, 1, at(2019, 6, 15, 23, 0)),
        (2, 2, at(2035, 4, 1, 20, 0)),
        (2, 2, at(2035, 4, 8, 20, 0)),
        (2, 2, at(2035, 4, 15, 20, 0)),
    ];
    for (venue, artist, start_time) in schedule {
        shows
            .create(NewShow {
                artist_id: Some(artist_ids[artist]),
                venue_id: Some(venue_ids[venue]),
                start_time: Some(start_time),
            })
            .await
            .wrap_err("Failed to seed show")?;
        summary.shows += 1;
    }

    log::info!(
        "Seeded {} venues, {} artists and {} shows",
        summary.venues,
        summary.artists,
        summary.shows
    );
    Ok(summary)
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn demo_venues() -> Vec<NewVenue> {
    vec![
        NewVenue {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: "123-123-1234".into(),
            image_link: "https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=400&q=60".into(),
            website_link: Some("https://www.themusicalhop.com".into()),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
            genres: vec![
                "Jazz".into(),
                "Reggae".into(),
                "Swing".into(),
                "Classical".into(),
                "Folk".into(),
            ],
            seeking_talent: true,
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .into(),
            ),
        },
        NewVenue {
            name: "The Dueling Pianos Bar".into(),
            city: "New York".into(),
            state: "NY".into(),
            address: "335 Delancey Street".into(),
            phone: "914-003-1132".into(),
            image_link: "https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=750&q=80".into(),
            website_link: Some("https://www.theduelingpianos.com".into()),
            facebook_link: Some("https://www.facebook.com/theduelingpianos".into()),
            genres: vec!["Classical".into(), "R&B".into(), "Hip-Hop".into()],
            ..Default::default()
        },
        NewVenue {
            name: "Park Square Live Music & Coffee".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "34 Whiskey Moore Ave".into(),
            phone: "415-000-1234".into(),
            image_link: "https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=747&q=80".into(),
            website_link: Some("https://www.parksquarelivemusicandcoffee.com".into()),
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".into()),
            genres: vec![
                "Rock n Roll".into(),
                "Jazz".into(),
                "Classical".into(),
                "Folk".into(),
            ],
            ..Default::default()
        },
    ]
}

fn demo_artists() -> Vec<NewArtist> {
    vec![
        NewArtist {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "326-123-5000".into(),
            image_link: "https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=300&q=80".into(),
            website_link: Some("https://www.gunsnpetalsband.com".into()),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
            genres: vec!["Rock n Roll".into()],
            seeking_venue: true,
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".into(),
            ),
        },
        NewArtist {
            name: "Matt Quevedo".into(),
            city: "New York".into(),
            state: "NY".into(),
            phone: "300-400-5000".into(),
            image_link: "https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=334&q=80".into(),
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".into()),
            genres: vec!["Jazz".into()],
            ..Default::default()
        },
        NewArtist {
            name: "The Wild Sax Band".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "432-325-5432".into(),
            image_link: "https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=794&q=80".into(),
            genres: vec!["Jazz".into(), "Classical".into()],
            ..Default::default()
        },
    ]
}
