//! Demo venues, artists and shows for a fresh database.

use color_eyre::{
    Result,
    eyre::{Context, OptionExt, eyre},
};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};

use crate::database::Database;
use crate::entities;
use crate::forms::show::parse_start_time;
use crate::services::{artist::ArtistInput, venue::VenueInput};

fn venues() -> Vec<VenueInput> {
    vec![
        VenueInput {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: Some("1231231234".into()),
            genres: vec![
                "Jazz".into(),
                "Reggae".into(),
                "Swing".into(),
                "Classical".into(),
                "Folk".into(),
            ],
            image_link: Some("https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&auto=format&fit=crop&w=400&q=60".into()),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
            website_link: Some("https://www.themusicalhop.com".into()),
            seeking_talent: true,
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .into(),
            ),
        },
        VenueInput {
            name: "The Dueling Pianos Bar".into(),
            city: "New York".into(),
            state: "NY".into(),
            address: "335 Delancey Street".into(),
            phone: Some("9140031132".into()),
            genres: vec!["Classical".into(), "R&B".into(), "Hip-Hop".into()],
            image_link: Some("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&auto=format&fit=crop&w=750&q=80".into()),
            facebook_link: Some("https://www.facebook.com/theduelingpianos".into()),
            website_link: Some("https://www.theduelingpianos.com".into()),
            seeking_talent: false,
            seeking_description: None,
        },
        VenueInput {
            name: "Park Square Live Music & Coffee".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "34 Whiskey Moore Ave".into(),
            phone: Some("4150001234".into()),
            genres: vec![
                "Rock n Roll".into(),
                "Jazz".into(),
                "Classical".into(),
                "Folk".into(),
            ],
            image_link: Some("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&auto=format&fit=crop&w=747&q=80".into()),
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".into()),
            website_link: Some("https://www.parksquarelivemusicandcoffee.com".into()),
            seeking_talent: false,
            seeking_description: None,
        },
    ]
}

fn artists() -> Vec<ArtistInput> {
    vec![
        ArtistInput {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("3261235000".into()),
            genres: vec!["Rock n Roll".into()],
            image_link: Some("https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&auto=format&fit=crop&w=300&q=80".into()),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
            website_link: Some("https://www.gunsnpetalsband.com".into()),
            seeking_venue: true,
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".into(),
            ),
        },
        ArtistInput {
            name: "Matt Quevedo".into(),
            city: "New York".into(),
            state: "NY".into(),
            phone: Some("3004005000".into()),
            genres: vec!["Jazz".into()],
            image_link: Some("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&auto=format&fit=crop&w=334&q=80".into()),
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".into()),
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        },
        ArtistInput {
            name: "The Wild Sax Band".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("4323255432".into()),
            genres: vec!["Jazz".into(), "Classical".into()],
            image_link: Some("https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&auto=format&fit=crop&w=794&q=80".into()),
            facebook_link: None,
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        },
    ]
}

/// (venue index, artist index, start time) into the lists above.
const SHOWS: &[(usize, usize, &str)] = &[
    (0, 0, "2019-05-21 21:30:00"),
    (2, 1, "2019-06-15 23:00:00"),
    (2, 2, "2035-04-01 20:00:00"),
    (2, 2, "2035-04-08 20:00:00"),
    (2, 2, "2035-04-15 20:00:00"),
];

/// Insert the demo data in one transaction. Returns `false` without
/// touching anything when the database already has venues.
pub async fn seed(db: &Database) -> Result<bool> {
    let existing = entities::venue::Entity::find()
        .count(&db.conn)
        .await
        .wrap_err("Failed to count venues")?;
    if existing > 0 {
        tracing::info!("Database already has {} venues, skipping seed", existing);
        return Ok(false);
    }

    let txn = db.conn.begin().await?;

    let mut venue_ids = Vec::new();
    for input in venues() {
        let venue = input
            .apply(entities::venue::ActiveModel::new())
            .insert(&txn)
            .await
            .wrap_err("Failed to insert demo venue")?;
        venue_ids.push(venue.id);
    }

    let mut artist_ids = Vec::new();
    for input in artists() {
        let artist = input
            .apply(entities::artist::ActiveModel::new())
            .insert(&txn)
            .await
            .wrap_err("Failed to insert demo artist")?;
        artist_ids.push(artist.id);
    }

    for &(venue, artist, start_time) in SHOWS {
        let show = entities::show::ActiveModel {
            venue_id: Set(*venue_ids.get(venue).ok_or_eyre("Unknown demo venue")?),
            artist_id: Set(*artist_ids.get(artist).ok_or_eyre("Unknown demo artist")?),
            start_time: Set(parse_start_time(start_time)
                .ok_or_else(|| eyre!("Invalid demo start time: {}", start_time))?),
            ..entities::show::ActiveModel::new()
        };
        show.insert(&txn)
            .await
            .wrap_err("Failed to insert demo show")?;
    }

    txn.commit().await?;

    tracing::info!(
        "Seeded {} venues, {} artists and {} shows",
        venue_ids.len(),
        artist_ids.len(),
        SHOWS.len()
    );
    Ok(true)
}
