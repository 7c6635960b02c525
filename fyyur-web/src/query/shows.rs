//! Flat show listing

use chrono::NaiveDateTime;
use fyyur_common::time::format_medium;
use fyyur_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

#[derive(sqlx::FromRow)]
struct ShowRow {
    id: i64,
    start_time: NaiveDateTime,
    venue_id: i64,
    venue_name: String,
    artist_id: i64,
    artist_name: String,
    artist_image_link: Option<String>,
}

/// Every show with its venue and artist resolved in one join
pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query_as::<_, ShowRow>(
        r#"
        SELECT s.id, s.start_time,
               v.id AS venue_id, v.name AS venue_name,
               a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link
        FROM Shows s
        JOIN Venue v ON v.id = s.venue_id
        JOIN Artist a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ShowListing {
            id: row.id,
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: format_medium(&row.start_time),
        })
        .collect())
}
