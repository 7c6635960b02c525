//! Show database operations

use fyyur_common::db::{NewShow, Show};
use fyyur_common::time::today;
use fyyur_common::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Insert a show and return its new id
///
/// Fails with a database error when the venue or artist does not exist.
pub async fn insert_show(pool: &SqlitePool, show: &NewShow) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        "INSERT INTO Shows (start_time, venue_id, artist_id, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(show.start_time)
    .bind(show.venue_id)
    .bind(show.artist_id)
    .bind(today())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    debug!(
        "Inserted show {} (venue {}, artist {}, {})",
        id, show.venue_id, show.artist_id, show.start_time
    );
    Ok(id)
}

/// Reschedule or reassign a show; refreshes `updated_at`
pub async fn update_show(pool: &SqlitePool, id: i64, show: &NewShow) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE Shows SET start_time = ?, venue_id = ?, artist_id = ?, updated_at = ? WHERE id = ?",
    )
    .bind(show.start_time)
    .bind(show.venue_id)
    .bind(show.artist_id)
    .bind(today())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

pub async fn load_show(pool: &SqlitePool, id: i64) -> Result<Option<Show>> {
    let show = sqlx::query_as::<_, Show>(
        "SELECT id, start_time, venue_id, artist_id, updated_at FROM Shows WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(show)
}
