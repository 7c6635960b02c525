//! Artist database operations

use fyyur_common::db::{Artist, NewArtist};
use fyyur_common::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Insert an artist and return its new id
pub async fn insert_artist(pool: &SqlitePool, artist: &NewArtist) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO Artist (
            name, city, state, phone, image_link, facebook_link, website,
            seeking_venue, seeking_description, genres
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(artist.genres.to_stored())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    debug!("Inserted artist {} ({})", id, artist.name);
    Ok(id)
}

/// Overwrite every editable field of an artist
///
/// Returns `false` when no artist has this id.
pub async fn update_artist(pool: &SqlitePool, id: i64, artist: &NewArtist) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE Artist SET
            name = ?, city = ?, state = ?, phone = ?, image_link = ?, facebook_link = ?,
            website = ?, seeking_venue = ?, seeking_description = ?, genres = ?
        WHERE id = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(artist.genres.to_stored())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// Load artist by id
pub async fn load_artist(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let artist = sqlx::query_as::<_, Artist>("SELECT * FROM Artist WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(artist)
}

pub async fn artist_exists(pool: &SqlitePool, id: i64) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM Artist WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}
