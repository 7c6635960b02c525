//! Venue database operations

use fyyur_common::db::{NewVenue, Venue};
use fyyur_common::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Insert a venue and return its new id
pub async fn insert_venue(pool: &SqlitePool, venue: &NewVenue) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO Venue (
            name, city, state, address, phone, image_link, facebook_link,
            website, seeking_talent, seeking_description, genres
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website)
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(venue.genres.to_stored())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    debug!("Inserted venue {} ({})", id, venue.name);
    Ok(id)
}

/// Overwrite every editable field of a venue
///
/// Returns `false` when no venue has this id.
pub async fn update_venue(pool: &SqlitePool, id: i64, venue: &NewVenue) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE Venue SET
            name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
            facebook_link = ?, website = ?, seeking_talent = ?, seeking_description = ?,
            genres = ?
        WHERE id = ?
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website)
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(venue.genres.to_stored())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a venue (its shows go with it)
///
/// Returns the deleted venue's name, or `None` when no venue has this id.
pub async fn delete_venue(pool: &SqlitePool, id: i64) -> Result<Option<String>> {
    let mut tx = pool.begin().await?;

    let name: Option<String> = sqlx::query_scalar("SELECT name FROM Venue WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(name) = name else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM Venue WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Some(name))
}

/// Load venue by id
pub async fn load_venue(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let venue = sqlx::query_as::<_, Venue>("SELECT * FROM Venue WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(venue)
}

pub async fn venue_exists(pool: &SqlitePool, id: i64) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM Venue WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}
