use chrono::{DateTime, NaiveDateTime, Utc};
use url::Url;

use crate::genres::Genres;
use crate::services::error::{ListingError, ListingResult};

/// Format of the show form's start time field.
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Venue fields as submitted for create or update.
#[derive(Debug, Clone, Default)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Artist fields as submitted for create or update.
#[derive(Debug, Clone, Default)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Both references are required; there is no placeholder default.
#[derive(Debug, Clone, Default)]
pub struct NewShow {
    pub artist_id: Option<i64>,
    pub venue_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
}

/// Profile fields after validation, shared by venues and artists.
#[derive(Debug, Clone)]
pub(crate) struct ValidProfile {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Genres,
    pub seeking: bool,
    pub seeking_comment: Option<String>,
}

pub(crate) struct ValidVenue {
    pub profile: ValidProfile,
    pub address: String,
}

pub(crate) struct ValidShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: Option<DateTime<Utc>>,
}

impl NewVenue {
    pub(crate) fn validate(self) -> ListingResult<ValidVenue> {
        let address = required("address", &self.address)?;
        let profile = validate_profile(ProfileInput {
            name: &self.name,
            city: &self.city,
            state: &self.state,
            phone: &self.phone,
            image_link: &self.image_link,
            website_link: self.website_link.as_deref(),
            facebook_link: self.facebook_link.as_deref(),
            genres: &self.genres,
            seeking: self.seeking_talent,
            seeking_comment: self.seeking_description.as_deref(),
        })?;

        Ok(ValidVenue { profile, address })
    }
}

impl NewArtist {
    pub(crate) fn validate(self) -> ListingResult<ValidProfile> {
        validate_profile(ProfileInput {
            name: &self.name,
            city: &self.city,
            state: &self.state,
            phone: &self.phone,
            image_link: &self.image_link,
            website_link: self.website_link.as_deref(),
            facebook_link: self.facebook_link.as_deref(),
            genres: &self.genres,
            seeking: self.seeking_venue,
            seeking_comment: self.seeking_description.as_deref(),
        })
    }
}

impl NewShow {
    pub(crate) fn validate(self) -> ListingResult<ValidShow> {
        let artist_id = self
            .artist_id
            .ok_or_else(|| ListingError::validation("Field 'artist_id' is required"))?;
        let venue_id = self
            .venue_id
            .ok_or_else(|| ListingError::validation("Field 'venue_id' is required"))?;

        Ok(ValidShow {
            artist_id,
            venue_id,
            start_time: self.start_time,
        })
    }
}

struct ProfileInput<'a> {
    name: &'a str,
    city: &'a str,
    state: &'a str,
    phone: &'a str,
    image_link: &'a str,
    website_link: Option<&'a str>,
    facebook_link: Option<&'a str>,
    genres: &'a [String],
    seeking: bool,
    seeking_comment: Option<&'a str>,
}

fn validate_profile(input: ProfileInput<'_>) -> ListingResult<ValidProfile> {
    Ok(ValidProfile {
        name: required("name", input.name)?,
        city: required("city", input.city)?,
        state: required("state", input.state)?,
        phone: required("phone", input.phone)?,
        image_link: required("image_link", input.image_link)?,
        website_link: optional_url("website_link", input.website_link)?,
        facebook_link: optional_url("facebook_link", input.facebook_link)?,
        genres: Genres::new(input.genres)?,
        seeking: input.seeking,
        seeking_comment: optional(input.seeking_comment),
    })
}

fn required(field: &str, value: &str) -> ListingResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ListingError::validation(format!(
            "Field '{}' is required",
            field
        )));
    }
    Ok(value.to_string())
}

/// Blank optional fields are stored as NULL.
fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn optional_url(field: &str, value: Option<&str>) -> ListingResult<Option<String>> {
    let Some(value) = optional(value) else {
        return Ok(None);
    };

    Url::parse(&value).map_err(|e| {
        ListingError::validation(format!("Field '{}' is not a valid URL: {}", field, e))
    })?;

    Ok(Some(value))
}

/// Parse a submitted start time, either `YYYY-MM-DD HH:MM:SS` (UTC) or RFC 3339.
/// A blank value means the show has no start time yet.
pub fn parse_start_time(raw: &str) -> ListingResult<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, START_TIME_FORMAT) {
        return Ok(Some(naive.and_utc()));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|date| Some(date.with_timezone(&Utc)))
        .map_err(|_| {
            ListingError::validation(format!(
                "Field 'start_time' must look like '2030-01-31 20:00:00', got '{}'",
                raw
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hop() -> NewVenue {
        NewVenue {
            name: "The Hop".to_string(),
            city: "SF".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123".to_string(),
            image_link: "x".to_string(),
            genres: vec!["Jazz".to_string(), "Folk".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_venue_passes() {
        let valid = hop().validate().unwrap();
        assert_eq!(valid.profile.name, "The Hop");
        assert_eq!(valid.profile.genres.to_storage(), "Jazz,Folk");
        assert_eq!(valid.address, "1015 Folsom Street");
        assert!(valid.profile.website_link.is_none());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        for field in ["name", "city", "state", "phone", "image_link", "address"] {
            let mut venue = hop();
            match field {
                "name" => venue.name = "   ".to_string(),
                "city" => venue.city.clear(),
                "state" => venue.state.clear(),
                "phone" => venue.phone.clear(),
                "image_link" => venue.image_link.clear(),
                _ => venue.address.clear(),
            }
            let err = venue.validate().err().unwrap();
            assert_eq!(err.kind(), "validation");
            assert!(err.to_string().contains(field), "{}", err);
        }
    }

    #[test]
    fn test_missing_genres_is_rejected() {
        let mut venue = hop();
        venue.genres.clear();
        assert!(matches!(
            venue.validate(),
            Err(ListingError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_links_are_rejected_and_blank_links_dropped() {
        let mut venue = hop();
        venue.facebook_link = Some("not a url".to_string());
        let err = venue.validate().err().unwrap();
        assert!(err.to_string().contains("facebook_link"));

        let mut venue = hop();
        venue.website_link = Some("  ".to_string());
        venue.facebook_link = Some("https://www.facebook.com/TheMusicalHop".to_string());
        let valid = venue.validate().unwrap();
        assert_eq!(valid.profile.website_link, None);
        assert_eq!(
            valid.profile.facebook_link.as_deref(),
            Some("https://www.facebook.com/TheMusicalHop")
        );
    }

    #[test]
    fn test_artist_requires_name() {
        let artist = NewArtist {
            city: "SF".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            image_link: "x".to_string(),
            genres: vec!["Rock n Roll".to_string()],
            ..Default::default()
        };
        let err = artist.validate().err().unwrap();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_show_requires_both_references() {
        let err = NewShow {
            artist_id: None,
            venue_id: Some(1),
            start_time: None,
        }
        .validate()
        .err()
        .unwrap();
        assert!(err.to_string().contains("artist_id"));

        let err = NewShow {
            artist_id: Some(1),
            venue_id: None,
            start_time: None,
        }
        .validate()
        .err()
        .unwrap();
        assert!(err.to_string().contains("venue_id"));
    }

    #[test]
    fn test_parse_start_time_formats() {
        let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(
            parse_start_time("2035-04-01 20:00:00").unwrap(),
            Some(expected)
        );
        assert_eq!(
            parse_start_time("2035-04-01T22:00:00+02:00").unwrap(),
            Some(expected)
        );
        assert_eq!(parse_start_time("  ").unwrap(), None);
        assert!(parse_start_time("next friday").is_err());
    }
}
