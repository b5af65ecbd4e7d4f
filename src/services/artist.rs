use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::instrument;

use super::{
    SearchHit, SearchResults, ShowEntry, ShowSchedule, StoreError, StoreResult,
    name_matches,
};
use crate::database::Database;
use crate::entities::{self, join_genres};

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    pub(crate) fn apply(
        self,
        mut artist: entities::artist::ActiveModel,
    ) -> entities::artist::ActiveModel {
        artist.name = Set(self.name);
        artist.city = Set(self.city);
        artist.state = Set(self.state);
        artist.phone = Set(self.phone);
        artist.genres = Set(join_genres(&self.genres));
        artist.image_link = Set(self.image_link);
        artist.facebook_link = Set(self.facebook_link);
        artist.website_link = Set(self.website_link);
        artist.seeking_venue = Set(self.seeking_venue);
        artist.seeking_description = Set(self.seeking_description);
        artist
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistDetail {
    pub artist: entities::artist::Model,
    pub genres: Vec<String>,
    pub schedule: ShowSchedule,
}

pub struct ArtistService {
    db: Arc<Database>,
}

impl ArtistService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ArtistInput) -> StoreResult<entities::artist::Model> {
        let txn = self.db.conn.begin().await?;
        let artist = input
            .apply(entities::artist::ActiveModel::new())
            .insert(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!("Artist created: '{}' (ID: {})", artist.name, artist.id);
        Ok(artist)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<entities::artist::Model>> {
        Ok(entities::artist::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?)
    }

    pub async fn list(&self) -> StoreResult<Vec<entities::artist::Model>> {
        Ok(entities::artist::Entity::find()
            .order_by_asc(entities::artist::Column::Name)
            .order_by_asc(entities::artist::Column::Id)
            .all(&self.db.conn)
            .await?)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: ArtistInput,
    ) -> StoreResult<entities::artist::Model> {
        let txn = self.db.conn.begin().await?;
        let artist = entities::artist::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "Artist",
                id,
            })?;

        let artist = input.apply(artist.into()).update(&txn).await?;
        txn.commit().await?;

        tracing::info!("Artist updated: '{}' (ID: {})", artist.name, artist.id);
        Ok(artist)
    }

    /// Deletes the artist and every show they were booked for. Not exposed
    /// over HTTP.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let txn = self.db.conn.begin().await?;
        let shows = entities::show::Entity::delete_many()
            .filter(entities::show::Column::ArtistId.eq(id))
            .exec(&txn)
            .await?;
        let artists = entities::artist::Entity::delete_by_id(id)
            .exec(&txn)
            .await?;

        if artists.rows_affected == 0 {
            return Err(StoreError::NotFound {
                entity: "Artist",
                id,
            });
        }
        txn.commit().await?;

        tracing::info!(
            "Artist {} deleted along with {} shows",
            id,
            shows.rows_affected
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn search(&self, term: &str, now: DateTime<Utc>) -> StoreResult<SearchResults> {
        let artists = entities::artist::Entity::find()
            .order_by_asc(entities::artist::Column::Name)
            .all(&self.db.conn)
            .await?;

        let mut data = Vec::new();
        for artist in artists.into_iter().filter(|artist| name_matches(&artist.name, term)) {
            data.push(SearchHit {
                id: artist.id,
                upcoming_show_count: self.upcoming_show_count(artist.id, now).await?,
                name: artist.name,
            });
        }

        Ok(SearchResults::new(data))
    }

    /// The artist with their shows split into past and upcoming, each joined
    /// with the hosting venue.
    #[instrument(skip(self))]
    pub async fn detail(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<ArtistDetail>> {
        let Some(artist) = self.get(id).await? else {
            return Ok(None);
        };

        let shows = entities::show::Entity::find()
            .filter(entities::show::Column::ArtistId.eq(id))
            .find_also_related(entities::venue::Entity)
            .all(&self.db.conn)
            .await?;

        let entries = shows
            .into_iter()
            .filter_map(|(show, venue)| {
                venue.map(|venue| ShowEntry {
                    counterpart_id: venue.id,
                    counterpart_name: venue.name,
                    counterpart_image_link: venue.image_link,
                    start_time: show.start_time,
                })
            })
            .collect();

        Ok(Some(ArtistDetail {
            genres: artist.genre_list(),
            artist,
            schedule: ShowSchedule::split(entries, now),
        }))
    }

    async fn upcoming_show_count(&self, artist_id: i64, now: DateTime<Utc>) -> StoreResult<u64> {
        Ok(entities::show::Entity::find()
            .filter(entities::show::Column::ArtistId.eq(artist_id))
            .filter(entities::show::Column::StartTime.gte(now))
            .count(&self.db.conn)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{insert_artist, insert_show, insert_venue, test_db};
    use chrono::{Duration, TimeZone};

    fn guns_n_petals() -> ArtistInput {
        ArtistInput {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("3261235000".into()),
            genres: vec!["Rock n Roll".into()],
            image_link: Some("https://images.example.com/gnp.jpg".into()),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
            website_link: Some("https://www.gunsnpetalsband.com".into()),
            seeking_venue: true,
            seeking_description: Some("Looking for shows in the Bay Area!".into()),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_db().await;
        let service = ArtistService::new(db);

        let created = service.create(guns_n_petals()).await.unwrap();
        let artist = service.get(created.id).await.unwrap().unwrap();

        assert_eq!(artist.id, created.id);
        assert_eq!(artist.name, "Guns N Petals");
        assert_eq!(artist.phone.as_deref(), Some("3261235000"));
        assert_eq!(artist.genre_list(), vec!["Rock n Roll"]);
        assert!(artist.seeking_venue);
    }

    #[tokio::test]
    async fn test_edit_name_keeps_other_fields() {
        let db = test_db().await;
        let service = ArtistService::new(db);
        let before = service.create(guns_n_petals()).await.unwrap();

        let mut input = guns_n_petals();
        input.name = "Guns N Roses N Petals".into();
        let after = service.update(before.id, input).await.unwrap();

        assert_eq!(after.name, "Guns N Roses N Petals");
        assert_eq!(after.city, before.city);
        assert_eq!(after.state, before.state);
        assert_eq!(after.phone, before.phone);
        assert_eq!(after.genres, before.genres);
        assert_eq!(after.image_link, before.image_link);
        assert_eq!(after.facebook_link, before.facebook_link);
        assert_eq!(after.website_link, before.website_link);
        assert_eq!(after.seeking_venue, before.seeking_venue);
        assert_eq!(after.seeking_description, before.seeking_description);

        let stored = service.get(before.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Guns N Roses N Petals");
    }

    #[tokio::test]
    async fn test_update_missing() {
        let db = test_db().await;
        let service = ArtistService::new(db);

        let err = service.update(404, guns_n_petals()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Artist 404 not found");
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let db = test_db().await;
        insert_artist(&db, "The Wild Sax Band", "San Francisco", "CA").await;
        insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await;
        insert_artist(&db, "Matt Quevedo", "New York", "NY").await;
        let service = ArtistService::new(db);

        let names: Vec<_> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|artist| artist.name)
            .collect();
        assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
    }

    #[tokio::test]
    async fn test_search() {
        let db = test_db().await;
        insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await;
        insert_artist(&db, "Matt Quevedo", "New York", "NY").await;
        insert_artist(&db, "The Wild Sax Band", "San Francisco", "CA").await;
        let service = ArtistService::new(db);

        assert_eq!(service.search("A", now()).await.unwrap().count, 3);

        let band = service.search("band", now()).await.unwrap();
        assert_eq!(band.count, 1);
        assert_eq!(band.data[0].name, "The Wild Sax Band");
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let db = test_db().await;
        insert_artist(&db, "Björk Ørkestra", "New York", "NY").await;
        insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await;
        let service = ArtistService::new(db);

        for term in ["björk", "BJÖRK", "ørkestra"] {
            let results = service.search(term, now()).await.unwrap();
            assert_eq!(results.count, 1, "{term}");
            assert_eq!(results.data[0].name, "Björk Ørkestra");
        }
        assert_eq!(service.search("_", now()).await.unwrap().count, 0);
    }

    #[tokio::test]
    async fn test_detail_joins_venues() {
        let db = test_db().await;
        let artist = insert_artist(&db, "The Wild Sax Band", "San Francisco", "CA").await;
        let venue =
            insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        insert_show(&db, venue.id, artist.id, now() + Duration::days(7)).await;
        insert_show(&db, venue.id, artist.id, now() + Duration::days(14)).await;
        insert_show(&db, venue.id, artist.id, now() + Duration::days(21)).await;
        let service = ArtistService::new(db);

        let detail = service.detail(artist.id, now()).await.unwrap().unwrap();

        assert_eq!(detail.schedule.past_shows_count(), 0);
        assert_eq!(detail.schedule.upcoming_shows_count(), 3);
        let entry = &detail.schedule.upcoming_shows[0];
        assert_eq!(entry.counterpart_id, venue.id);
        assert_eq!(entry.counterpart_name, "Park Square Live Music & Coffee");
        assert_eq!(entry.counterpart_image_link, venue.image_link);
        assert_eq!(entry.start_time, now() + Duration::days(7));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_shows() {
        let db = test_db().await;
        let artist = insert_artist(&db, "Matt Quevedo", "New York", "NY").await;
        let venue = insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
        insert_show(&db, venue.id, artist.id, now()).await;
        let service = ArtistService::new(db.clone());

        service.delete(artist.id).await.unwrap();

        assert!(service.get(artist.id).await.unwrap().is_none());
        let shows = entities::show::Entity::find()
            .filter(entities::show::Column::ArtistId.eq(artist.id))
            .count(&db.conn)
            .await
            .unwrap();
        assert_eq!(shows, 0);
        // The venue itself survives
        assert!(
            entities::venue::Entity::find_by_id(venue.id)
                .one(&db.conn)
                .await
                .unwrap()
                .is_some()
        );
    }
}
