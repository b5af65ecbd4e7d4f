use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::instrument;

use super::StoreResult;
use crate::database::Database;
use crate::entities;

#[derive(Debug, Clone, PartialEq)]
pub struct ShowInput {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// A row of the global show listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

pub struct ShowService {
    db: Arc<Database>,
}

impl ShowService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Books a show. Unknown venue or artist ids are rejected by the
    /// foreign key constraints, not checked up front.
    #[instrument(skip(self))]
    pub async fn create(&self, input: ShowInput) -> StoreResult<entities::show::Model> {
        let show = entities::show::ActiveModel {
            venue_id: Set(input.venue_id),
            artist_id: Set(input.artist_id),
            start_time: Set(input.start_time),
            ..entities::show::ActiveModel::new()
        };

        let txn = self.db.conn.begin().await?;
        let show = show.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            "Show created: venue {} / artist {} at {} (ID: {})",
            show.venue_id,
            show.artist_id,
            show.start_time,
            show.id
        );
        Ok(show)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<entities::show::Model>> {
        Ok(entities::show::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?)
    }

    /// Every show joined with its venue and artist, earliest first.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> StoreResult<Vec<ShowListing>> {
        let shows = entities::show::Entity::find()
            .order_by_asc(entities::show::Column::StartTime)
            .order_by_asc(entities::show::Column::Id)
            .find_also_related(entities::venue::Entity)
            .all(&self.db.conn)
            .await?;

        let mut artist_ids: Vec<i64> = shows.iter().map(|(show, _)| show.artist_id).collect();
        artist_ids.sort_unstable();
        artist_ids.dedup();

        let artists: HashMap<i64, entities::artist::Model> = if artist_ids.is_empty() {
            HashMap::new()
        } else {
            entities::artist::Entity::find()
                .filter(entities::artist::Column::Id.is_in(artist_ids))
                .all(&self.db.conn)
                .await?
                .into_iter()
                .map(|artist| (artist.id, artist))
                .collect()
        };

        let listings = shows
            .into_iter()
            .filter_map(|(show, venue)| {
                let venue = venue?;
                let artist = artists.get(&show.artist_id)?;
                Some(ShowListing {
                    id: show.id,
                    venue_id: venue.id,
                    venue_name: venue.name,
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect();

        Ok(listings)
    }
}
