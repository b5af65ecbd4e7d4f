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

/// Every mutable venue field, as accepted from a validated form.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    /// Overwrites every mutable column; edits are full replacements.
    pub(crate) fn apply(
        self,
        mut venue: entities::venue::ActiveModel,
    ) -> entities::venue::ActiveModel {
        venue.name = Set(self.name);
        venue.city = Set(self.city);
        venue.state = Set(self.state);
        venue.address = Set(self.address);
        venue.phone = Set(self.phone);
        venue.genres = Set(join_genres(&self.genres));
        venue.image_link = Set(self.image_link);
        venue.facebook_link = Set(self.facebook_link);
        venue.website_link = Set(self.website_link);
        venue.seeking_talent = Set(self.seeking_talent);
        venue.seeking_description = Set(self.seeking_description);
        venue
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub upcoming_show_count: u64,
}

/// Venues sharing one (state, city) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VenueDetail {
    pub venue: entities::venue::Model,
    pub genres: Vec<String>,
    pub schedule: ShowSchedule,
}

pub struct VenueService {
    db: Arc<Database>,
}

impl VenueService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: VenueInput) -> StoreResult<entities::venue::Model> {
        let txn = self.db.conn.begin().await?;
        let venue = input
            .apply(entities::venue::ActiveModel::new())
            .insert(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!("Venue created: '{}' (ID: {})", venue.name, venue.id);
        Ok(venue)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<entities::venue::Model>> {
        Ok(entities::venue::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: VenueInput) -> StoreResult<entities::venue::Model> {
        let txn = self.db.conn.begin().await?;
        let venue = entities::venue::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "Venue",
                id,
            })?;

        let venue = input.apply(venue.into()).update(&txn).await?;
        txn.commit().await?;

        tracing::info!("Venue updated: '{}' (ID: {})", venue.name, venue.id);
        Ok(venue)
    }

    /// Deletes the venue together with every show booked there.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let txn = self.db.conn.begin().await?;
        let shows = entities::show::Entity::delete_many()
            .filter(entities::show::Column::VenueId.eq(id))
            .exec(&txn)
            .await?;
        let venues = entities::venue::Entity::delete_by_id(id).exec(&txn).await?;

        if venues.rows_affected == 0 {
            // Dropping the transaction rolls back the show deletion
            return Err(StoreError::NotFound {
                entity: "Venue",
                id,
            });
        }
        txn.commit().await?;

        tracing::info!(
            "Venue {} deleted along with {} shows",
            id,
            shows.rows_affected
        );
        Ok(())
    }

    /// Groups all venues by (state, city), sorted by state then city.
    #[instrument(skip(self))]
    pub async fn list_by_location(&self, now: DateTime<Utc>) -> StoreResult<Vec<VenueArea>> {
        let venues = entities::venue::Entity::find()
            .order_by_asc(entities::venue::Column::State)
            .order_by_asc(entities::venue::Column::City)
            .order_by_asc(entities::venue::Column::Id)
            .all(&self.db.conn)
            .await?;

        let mut areas: Vec<VenueArea> = Vec::new();
        for venue in venues {
            let summary = VenueSummary {
                id: venue.id,
                upcoming_show_count: self.upcoming_show_count(venue.id, now).await?,
                name: venue.name,
            };

            match areas.last_mut() {
                Some(area) if area.state == venue.state && area.city == venue.city => {
                    area.venues.push(summary)
                }
                _ => areas.push(VenueArea {
                    city: venue.city,
                    state: venue.state,
                    venues: vec![summary],
                }),
            }
        }

        Ok(areas)
    }

    /// Case-insensitive substring search on the venue name.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str, now: DateTime<Utc>) -> StoreResult<SearchResults> {
        let venues = entities::venue::Entity::find()
            .order_by_asc(entities::venue::Column::Name)
            .all(&self.db.conn)
            .await?;

        let mut data = Vec::new();
        for venue in venues.into_iter().filter(|venue| name_matches(&venue.name, term)) {
            data.push(SearchHit {
                id: venue.id,
                upcoming_show_count: self.upcoming_show_count(venue.id, now).await?,
                name: venue.name,
            });
        }

        Ok(SearchResults::new(data))
    }

    /// The venue with its shows split into past and upcoming, each joined
    /// with the performing artist.
    #[instrument(skip(self))]
    pub async fn detail(&self, id: i64, now: DateTime<Utc>) -> StoreResult<Option<VenueDetail>> {
        let Some(venue) = self.get(id).await? else {
            return Ok(None);
        };

        let shows = entities::show::Entity::find()
            .filter(entities::show::Column::VenueId.eq(id))
            .find_also_related(entities::artist::Entity)
            .all(&self.db.conn)
            .await?;

        let entries = shows
            .into_iter()
            .filter_map(|(show, artist)| {
                artist.map(|artist| ShowEntry {
                    counterpart_id: artist.id,
                    counterpart_name: artist.name,
                    counterpart_image_link: artist.image_link,
                    start_time: show.start_time,
                })
            })
            .collect();

        Ok(Some(VenueDetail {
            genres: venue.genre_list(),
            venue,
            schedule: ShowSchedule::split(entries, now),
        }))
    }

    async fn upcoming_show_count(&self, venue_id: i64, now: DateTime<Utc>) -> StoreResult<u64> {
        Ok(entities::show::Entity::find()
            .filter(entities::show::Column::VenueId.eq(venue_id))
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

    fn musical_hop() -> VenueInput {
        VenueInput {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: Some("1231231234".into()),
            genres: vec!["Jazz".into(), "Reggae".into(), "Swing".into()],
            image_link: Some("https://images.example.com/hop.jpg".into()),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
            website_link: Some("https://www.themusicalhop.com".into()),
            seeking_talent: true,
            seeking_description: Some("Looking for a local artist".into()),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_db().await;
        let service = VenueService::new(db);

        let created = service.create(musical_hop()).await.unwrap();
        let venue = service.get(created.id).await.unwrap().unwrap();

        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.city, "San Francisco");
        assert_eq!(venue.state, "CA");
        assert_eq!(venue.address, "1015 Folsom Street");
        assert_eq!(venue.phone.as_deref(), Some("1231231234"));
        assert_eq!(venue.genre_list(), vec!["Jazz", "Reggae", "Swing"]);
        assert_eq!(
            venue.website_link.as_deref(),
            Some("https://www.themusicalhop.com")
        );
        assert!(venue.seeking_talent);
        assert_eq!(
            venue.seeking_description.as_deref(),
            Some("Looking for a local artist")
        );
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = test_db().await;
        let service = VenueService::new(db);

        assert!(service.get(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let db = test_db().await;
        let service = VenueService::new(db);
        let created = service.create(musical_hop()).await.unwrap();

        let mut input = musical_hop();
        input.name = "The Musical Hop Annex".into();
        input.genres = vec!["Folk".into()];
        input.website_link = None;
        input.seeking_talent = false;

        let updated = service.update(created.id, input).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "The Musical Hop Annex");
        assert_eq!(updated.genres, "Folk");
        assert!(updated.website_link.is_none());
        assert!(!updated.seeking_talent);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let db = test_db().await;
        let service = VenueService::new(db);

        let result = service.update(42, musical_hop()).await;
        assert!(matches!(
            result,
            Err(StoreError::NotFound {
                entity: "Venue",
                id: 42
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_shows() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let other = insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
        let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await;
        insert_show(&db, venue.id, artist.id, now() - Duration::days(3)).await;
        insert_show(&db, venue.id, artist.id, now() + Duration::days(3)).await;
        let kept = insert_show(&db, other.id, artist.id, now()).await;

        let service = VenueService::new(db.clone());
        service.delete(venue.id).await.unwrap();

        assert!(service.get(venue.id).await.unwrap().is_none());
        let remaining = entities::show::Entity::find()
            .all(&db.conn)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
        let orphans = entities::show::Entity::find()
            .filter(entities::show::Column::VenueId.eq(venue.id))
            .count(&db.conn)
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let db = test_db().await;
        let service = VenueService::new(db);

        let err = service.delete(7).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let db = test_db().await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        let service = VenueService::new(db);

        let hop = service.search("Hop", now()).await.unwrap();
        assert_eq!(hop.count, 1);
        assert_eq!(hop.data[0].name, "The Musical Hop");

        let music = service.search("music", now()).await.unwrap();
        assert_eq!(music.count, 2);

        let shouting = service.search("MUSIC", now()).await.unwrap();
        assert_eq!(shouting.count, 2);

        let none = service.search("Pianos", now()).await.unwrap();
        assert_eq!(none.count, 0);
        assert!(none.data.is_empty());
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let db = test_db().await;
        insert_venue(&db, "Café Électrique", "Montréal", "NY").await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let service = VenueService::new(db);

        for term in ["électrique", "ÉLECTRIQUE", "CAFÉ"] {
            let results = service.search(term, now()).await.unwrap();
            assert_eq!(results.count, 1, "{term}");
            assert_eq!(results.data[0].name, "Café Électrique");
        }
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = test_db().await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_venue(&db, "100% Jazz", "New York", "NY").await;
        let service = VenueService::new(db);

        assert_eq!(service.search("_", now()).await.unwrap().count, 0);

        let percent = service.search("%", now()).await.unwrap();
        assert_eq!(percent.count, 1);
        assert_eq!(percent.data[0].name, "100% Jazz");
    }

    #[tokio::test]
    async fn test_search_blank_term_matches_all() {
        let db = test_db().await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_venue(&db, "Dive", "Austin", "TX").await;
        let service = VenueService::new(db);

        assert_eq!(service.search("", now()).await.unwrap().count, 2);
        assert_eq!(service.search(" ", now()).await.unwrap().count, 2);
    }

    #[tokio::test]
    async fn test_search_counts_upcoming_shows() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "The Wild Sax Band", "San Francisco", "CA").await;
        insert_show(&db, venue.id, artist.id, now() - Duration::days(1)).await;
        insert_show(&db, venue.id, artist.id, now() + Duration::days(1)).await;
        insert_show(&db, venue.id, artist.id, now() + Duration::days(8)).await;
        let service = VenueService::new(db);

        let results = service.search("hop", now()).await.unwrap();
        assert_eq!(results.data[0].upcoming_show_count, 2);
    }

    #[tokio::test]
    async fn test_list_by_location_groups_and_sorts() {
        let db = test_db().await;
        let dueling = insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let park =
            insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        let la = insert_venue(&db, "Echo", "Los Angeles", "CA").await;
        let artist = insert_artist(&db, "Matt Quevedo", "New York", "NY").await;
        insert_show(&db, park.id, artist.id, now() + Duration::days(2)).await;
        insert_show(&db, hop.id, artist.id, now() - Duration::days(2)).await;
        let service = VenueService::new(db);

        let areas = service.list_by_location(now()).await.unwrap();

        let keys: Vec<_> = areas
            .iter()
            .map(|area| (area.state.as_str(), area.city.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("CA", "Los Angeles"),
                ("CA", "San Francisco"),
                ("NY", "New York")
            ]
        );
        assert_eq!(areas[0].venues[0].id, la.id);
        assert_eq!(
            areas[1].venues,
            vec![
                VenueSummary {
                    id: hop.id,
                    name: "The Musical Hop".into(),
                    upcoming_show_count: 0,
                },
                VenueSummary {
                    id: park.id,
                    name: "Park Square Live Music & Coffee".into(),
                    upcoming_show_count: 1,
                },
            ]
        );
        assert_eq!(areas[2].venues[0].id, dueling.id);
    }

    #[tokio::test]
    async fn test_detail_splits_past_and_upcoming() {
        let db = test_db().await;
        let venue =
            insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        let past_artist = insert_artist(&db, "Matt Quevedo", "New York", "NY").await;
        let next_artist = insert_artist(&db, "The Wild Sax Band", "San Francisco", "CA").await;
        insert_show(&db, venue.id, past_artist.id, now() - Duration::days(30)).await;
        insert_show(&db, venue.id, next_artist.id, now() + Duration::days(30)).await;
        let service = VenueService::new(db);

        let detail = service.detail(venue.id, now()).await.unwrap().unwrap();

        assert_eq!(detail.venue.id, venue.id);
        assert_eq!(detail.genres, vec!["Jazz", "Swing"]);
        assert_eq!(detail.schedule.past_shows_count(), 1);
        assert_eq!(detail.schedule.upcoming_shows_count(), 1);
        assert_eq!(detail.schedule.past_shows[0].counterpart_id, past_artist.id);
        assert_eq!(detail.schedule.past_shows[0].counterpart_name, "Matt Quevedo");
        assert_eq!(
            detail.schedule.upcoming_shows[0].counterpart_name,
            "The Wild Sax Band"
        );
        assert_eq!(
            detail.schedule.upcoming_shows[0].counterpart_image_link,
            next_artist.image_link
        );
    }

    #[tokio::test]
    async fn test_detail_show_at_now_is_upcoming() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals", "San Francisco", "CA").await;
        insert_show(&db, venue.id, artist.id, now()).await;
        let service = VenueService::new(db);

        let detail = service.detail(venue.id, now()).await.unwrap().unwrap();
        assert_eq!(detail.schedule.past_shows_count(), 0);
        assert_eq!(detail.schedule.upcoming_shows_count(), 1);

        let areas = service.list_by_location(now()).await.unwrap();
        assert_eq!(areas[0].venues[0].upcoming_show_count, 1);
    }

    #[tokio::test]
    async fn test_detail_missing() {
        let db = test_db().await;
        let service = VenueService::new(db);

        assert!(service.detail(5, now()).await.unwrap().is_none());
    }
}
