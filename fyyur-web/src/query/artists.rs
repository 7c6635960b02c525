//! Artist pages: listing, search, detail with show history

use super::{filter_by_name, partition_by_start, SearchHit, SearchResults};
use chrono::NaiveDateTime;
use fyyur_common::db::Artist;
use fyyur_common::time::timestamp_text;
use fyyur_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ArtistListing {
    pub id: i64,
    pub name: String,
}

/// Show by an artist, seen from the artist's page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(sqlx::FromRow)]
struct ArtistShowRow {
    start_time: NaiveDateTime,
    venue_id: i64,
    venue_name: String,
    venue_image_link: Option<String>,
}

pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<ArtistListing>> {
    let artists = sqlx::query_as::<_, ArtistListing>("SELECT id, name FROM Artist ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(artists)
}

/// Case-insensitive substring search on artist names
pub async fn search_artists(
    pool: &SqlitePool,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let hits = sqlx::query_as::<_, SearchHit>(
        r#"
        SELECT a.id, a.name, COUNT(s.id) AS num_upcoming_shows
        FROM Artist a
        LEFT JOIN Shows s ON s.artist_id = a.id AND s.start_time > ?
        GROUP BY a.id
        ORDER BY a.name, a.id
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(filter_by_name(hits, term))
}

/// Artist with their shows split into past and upcoming
///
/// Returns `None` when no artist has this id.
pub async fn artist_detail(
    pool: &SqlitePool,
    id: i64,
    now: NaiveDateTime,
) -> Result<Option<ArtistDetail>> {
    let Some(artist) = crate::db::load_artist(pool, id).await? else {
        return Ok(None);
    };

    let rows = sqlx::query_as::<_, ArtistShowRow>(
        r#"
        SELECT s.start_time, v.id AS venue_id, v.name AS venue_name,
               v.image_link AS venue_image_link
        FROM Shows s
        JOIN Venue v ON v.id = s.venue_id
        WHERE s.artist_id = ?
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
                ArtistShow {
                    venue_id: row.venue_id,
                    venue_name: row.venue_name,
                    venue_image_link: row.venue_image_link,
                    start_time: timestamp_text(&row.start_time),
                },
            )
        }),
        now,
    );

    Ok(Some(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}
