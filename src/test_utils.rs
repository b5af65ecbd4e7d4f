use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, ConnectOptions, Set};

use crate::database::Database;
use crate::entities;

pub async fn test_db() -> Arc<Database> {
    // One connection so every query sees the same in-memory database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    Arc::new(Database::connect(opt).await.unwrap())
}

pub async fn insert_venue(
    db: &Database,
    name: &str,
    city: &str,
    state: &str,
) -> entities::venue::Model {
    let venue = entities::venue::ActiveModel {
        name: Set(name.into()),
        city: Set(city.into()),
        state: Set(state.into()),
        address: Set("1015 Folsom Street".into()),
        phone: Set(Some("1231231234".into())),
        genres: Set("Jazz,Swing".into()),
        image_link: Set(Some(format!("https://images.example.com/{}.jpg", name.len()))),
        facebook_link: Set(None),
        website_link: Set(None),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        ..entities::venue::ActiveModel::new()
    };
    venue.insert(&db.conn).await.unwrap()
}

pub async fn insert_artist(
    db: &Database,
    name: &str,
    city: &str,
    state: &str,
) -> entities::artist::Model {
    let artist = entities::artist::ActiveModel {
        name: Set(name.into()),
        city: Set(city.into()),
        state: Set(state.into()),
        phone: Set(Some("3261235000".into())),
        genres: Set("Rock n Roll".into()),
        image_link: Set(Some("https://images.example.com/artist.jpg".into())),
        facebook_link: Set(Some("https://www.facebook.com/artist".into())),
        website_link: Set(None),
        seeking_venue: Set(true),
        seeking_description: Set(Some("Looking for shows".into())),
        ..entities::artist::ActiveModel::new()
    };
    artist.insert(&db.conn).await.unwrap()
}

pub async fn insert_show(
    db: &Database,
    venue_id: i64,
    artist_id: i64,
    start_time: DateTime<Utc>,
) -> entities::show::Model {
    let show = entities::show::ActiveModel {
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        start_time: Set(start_time),
        ..entities::show::ActiveModel::new()
    };
    show.insert(&db.conn).await.unwrap()
}
