//! Venue pages: grouped listing, search, detail with show history

use super::{filter_by_name, partition_by_start, SearchHit, SearchResults};
use chrono::NaiveDateTime;
use fyyur_common::db::Venue;
use fyyur_common::time::timestamp_text;
use fyyur_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// Venues sharing one (state, city) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<SearchHit>,
}

/// Show at a venue, seen from the venue's page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(sqlx::FromRow)]
struct AreaRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    num_upcoming_shows: i64,
}

#[derive(sqlx::FromRow)]
struct VenueShowRow {
    start_time: NaiveDateTime,
    artist_id: i64,
    artist_name: String,
    artist_image_link: Option<String>,
}

/// All venues grouped by (state, city), each with its upcoming show count
pub async fn list_venue_areas(pool: &SqlitePool, now: NaiveDateTime) -> Result<Vec<VenueArea>> {
    let rows = sqlx::query_as::<_, AreaRow>(
        r#"
        SELECT v.id, v.name, v.city, v.state, COUNT(s.id) AS num_upcoming_shows
        FROM Venue v
        LEFT JOIN Shows s ON s.venue_id = v.id AND s.start_time > ?
        GROUP BY v.id
        ORDER BY v.state, v.city, v.id
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(group_areas(rows))
}

/// Rows arrive sorted by (state, city), so each area is a contiguous run
fn group_areas(rows: Vec<AreaRow>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();
    for row in rows {
        let hit = SearchHit {
            id: row.id,
            name: row.name,
            num_upcoming_shows: row.num_upcoming_shows,
        };
        match areas.last_mut() {
            Some(area) if area.state == row.state && area.city == row.city => area.venues.push(hit),
            _ => areas.push(VenueArea {
                city: row.city,
                state: row.state,
                venues: vec![hit],
            }),
        }
    }
    areas
}

/// Case-insensitive substring search on venue names
pub async fn search_venues(
    pool: &SqlitePool,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let hits = sqlx::query_as::<_, SearchHit>(
        r#"
        SELECT v.id, v.name, COUNT(s.id) AS num_upcoming_shows
        FROM Venue v
        LEFT JOIN Shows s ON s.venue_id = v.id AND s.start_time > ?
        GROUP BY v.id
        ORDER BY v.name, v.id
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(filter_by_name(hits, term))
}

/// Venue with its shows split into past and upcoming
///
/// Returns `None` when no venue has this id.
pub async fn venue_detail(
    pool: &SqlitePool,
    id: i64,
    now: NaiveDateTime,
) -> Result<Option<VenueDetail>> {
    let Some(venue) = crate::db::load_venue(pool, id).await? else {
        return Ok(None);
    };

    let rows = sqlx::query_as::<_, VenueShowRow>(
        r#"
        SELECT s.start_time, a.id AS artist_id, a.name AS artist_name,
               a.image_link AS artist_image_link
        FROM Shows s
        JOIN Artist a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let (past_shows, upcoming_shows) = partition_by_start(
        rows.into_iter().map(|row| {
            (
                row.start_time,
                VenueShow {
                    artist_id: row.artist_id,
                    artist_name: row.artist_name,
                    artist_image_link: row.artist_image_link,
                    start_time: timestamp_text(&row.start_time),
                },
            )
        }),
        now,
    );

    Ok(Some(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}
