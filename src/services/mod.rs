pub mod artist;
pub mod show;
pub mod venue;

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde::Serialize;

/// Failure of a record store operation.
///
/// Persistence failures carry the database error for logging only; pages
/// show a generic message instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Database operation failed: {0}")]
    Persistence(#[from] DbErr),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One row of a name search, serialized as `{id, name, upcoming_show_count}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub upcoming_show_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

impl SearchResults {
    pub fn new(data: Vec<SearchHit>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// A show as seen from one side of the booking: the counterpart is the
/// artist on a venue page and the venue on an artist page.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowEntry {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Shows of a venue or artist split around a point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowSchedule {
    pub past_shows: Vec<ShowEntry>,
    pub upcoming_shows: Vec<ShowEntry>,
}

impl ShowSchedule {
    /// Entries before `now` are past, everything else (including a show
    /// starting exactly at `now`) is upcoming. Both lists keep start order.
    pub fn split(mut entries: Vec<ShowEntry>, now: DateTime<Utc>) -> Self {
        entries.sort_by_key(|entry| entry.start_time);
        let (past_shows, upcoming_shows) = entries
            .into_iter()
            .partition(|entry| entry.start_time < now);

        Self {
            past_shows,
            upcoming_shows,
        }
    }

    pub fn past_shows_count(&self) -> usize {
        self.past_shows.len()
    }

    pub fn upcoming_shows_count(&self) -> usize {
        self.upcoming_shows.len()
    }
}

/// Blank search terms match every row.
fn normalize_search_term(term: &str) -> Option<&str> {
    let term = term.trim();
    if term.is_empty() { None } else { Some(term) }
}

/// Case-insensitive substring match on a name, with Unicode case folding.
/// `%` and `_` in the term are literal.
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    match normalize_search_term(term) {
        Some(term) => name.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn entry(name: &str, start_time: DateTime<Utc>) -> ShowEntry {
        ShowEntry {
            counterpart_id: 1,
            counterpart_name: name.into(),
            counterpart_image_link: None,
            start_time,
        }
    }

    #[test]
    fn test_split_schedule() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 20, 0, 0).unwrap();
        let schedule = ShowSchedule::split(
            vec![
                entry("later", now + Duration::days(7)),
                entry("earlier", now - Duration::days(7)),
                entry("soon", now + Duration::hours(1)),
            ],
            now,
        );

        assert_eq!(schedule.past_shows_count(), 1);
        assert_eq!(schedule.upcoming_shows_count(), 2);
        assert_eq!(schedule.past_shows[0].counterpart_name, "earlier");
        assert_eq!(schedule.upcoming_shows[0].counterpart_name, "soon");
        assert_eq!(schedule.upcoming_shows[1].counterpart_name, "later");
    }

    #[test]
    fn test_split_schedule_show_starting_now_is_upcoming() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 20, 0, 0).unwrap();
        let schedule = ShowSchedule::split(vec![entry("now", now)], now);

        assert!(schedule.past_shows.is_empty());
        assert_eq!(schedule.upcoming_shows_count(), 1);
    }

    #[test]
    fn test_search_results_count_matches_data() {
        let results = SearchResults::new(vec![SearchHit {
            id: 2,
            name: "The Dueling Pianos Bar".into(),
            upcoming_show_count: 0,
        }]);

        assert_eq!(
            serde_json::to_value(&results).unwrap(),
            serde_json::json!({
                "count": 1,
                "data": [{"id": 2, "name": "The Dueling Pianos Bar", "upcoming_show_count": 0}]
            })
        );
    }

    #[test]
    fn test_normalize_search_term() {
        assert_eq!(normalize_search_term(" Hop "), Some("Hop"));
        assert_eq!(normalize_search_term(" "), None);
        assert_eq!(normalize_search_term(""), None);
    }

    #[test]
    fn test_name_matches() {
        assert!(name_matches("The Musical Hop", "musical"));
        assert!(name_matches("Café Électrique", "électrique"));
        assert!(name_matches("Café Électrique", "CAFÉ"));
        assert!(name_matches("Café Électrique", " "));
        assert!(!name_matches("The Musical Hop", "_"));
        assert!(!name_matches("The Musical Hop", "%"));
    }
}
