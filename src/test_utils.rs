use std::sync::Arc;

use crate::database::Database;
use crate::services::forms::{NewArtist, NewVenue};

pub async fn test_db() -> Arc<Database> {
    Arc::new(Database::in_memory().await.unwrap())
}

pub fn new_venue(name: &str, city: &str, state: &str) -> NewVenue {
    NewVenue {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: "123-123-1234".to_string(),
        image_link: format!("https://images.example.com/{}.jpg", name.replace(' ', "-")),
        genres: vec!["Jazz".to_string(), "Folk".to_string()],
        ..Default::default()
    }
}

pub fn new_artist(name: &str) -> NewArtist {
    NewArtist {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: "326-123-5000".to_string(),
        image_link: format!("https://images.example.com/{}.jpg", name.replace(' ', "-")),
        genres: vec!["Rock n Roll".to_string()],
        ..Default::default()
    }
}
