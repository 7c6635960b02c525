//! Page-specific read queries
//!
//! Every query takes the reference instant `now` explicitly so a whole page
//! is computed against one clock reading. A show is upcoming when
//! `start_time > now` and past otherwise.

pub mod artists;
pub mod shows;
pub mod venues;

use chrono::NaiveDateTime;
use serde::Serialize;

pub use artists::{artist_detail, list_artists, search_artists, ArtistDetail, ArtistListing};
pub use shows::{list_shows, ShowListing};
pub use venues::{list_venue_areas, search_venues, venue_detail, VenueArea, VenueDetail};

/// Search page payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl From<Vec<SearchHit>> for SearchResults {
    fn from(data: Vec<SearchHit>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Keep the hits whose name contains `term`, ignoring case
///
/// Folding goes through uppercase first so expansions like `ß` -> `SS`
/// compare equal; an empty term keeps everything.
pub(crate) fn filter_by_name(hits: Vec<SearchHit>, term: &str) -> SearchResults {
    let term = fold_case(term);
    hits.into_iter()
        .filter(|hit| fold_case(&hit.name).contains(&term))
        .collect::<Vec<_>>()
        .into()
}

fn fold_case(value: &str) -> String {
    value.to_uppercase().to_lowercase()
}

/// Split time-ordered rows into (past, upcoming) in one pass
pub(crate) fn partition_by_start<T>(
    rows: impl IntoIterator<Item = (NaiveDateTime, T)>,
    now: NaiveDateTime,
) -> (Vec<T>, Vec<T>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for (start_time, row) in rows {
        if start_time > now {
            upcoming.push(row);
        } else {
            past.push(row);
        }
    }
    (past, upcoming)
}
