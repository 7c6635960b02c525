//! Database models

use crate::Genres;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A place that hosts shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

/// A performer who can be booked into shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

/// A scheduled performance of one artist at one venue
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Show {
    pub id: i64,
    pub start_time: NaiveDateTime,
    pub venue_id: i64,
    pub artist_id: i64,
    pub updated_at: NaiveDate,
}

/// Validated venue fields, used for both insert and update
#[derive(Debug, Clone, PartialEq)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

/// Validated artist fields, used for both insert and update
#[derive(Debug, Clone, PartialEq)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

/// Validated show fields
#[derive(Debug, Clone, PartialEq)]
pub struct NewShow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
}

impl<'r> FromRow<'r, SqliteRow> for Venue {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let genres: String = row.try_get("genres")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            image_link: row.try_get("image_link")?,
            facebook_link: row.try_get("facebook_link")?,
            website: row.try_get("website")?,
            seeking_talent: row.try_get("seeking_talent")?,
            seeking_description: row.try_get("seeking_description")?,
            genres: Genres::from_stored(&genres),
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Artist {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let genres: String = row.try_get("genres")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            phone: row.try_get("phone")?,
            image_link: row.try_get("image_link")?,
            facebook_link: row.try_get("facebook_link")?,
            website: row.try_get("website")?,
            seeking_venue: row.try_get("seeking_venue")?,
            seeking_description: row.try_get("seeking_description")?,
            genres: Genres::from_stored(&genres),
        })
    }
}

impl NewVenue {
    /// Field values of an existing record, as a starting point for an edit
    pub fn from_record(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone(),
            facebook_link: venue.facebook_link.clone(),
            website: venue.website.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
            genres: venue.genres.clone(),
        }
    }
}

impl NewArtist {
    /// Field values of an existing record, as a starting point for an edit
    pub fn from_record(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            image_link: artist.image_link.clone(),
            facebook_link: artist.facebook_link.clone(),
            website: artist.website.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
            genres: artist.genres.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_memory_database;

    #[tokio::test]
    async fn test_venue_from_row_decodes_legacy_genres() {
        let pool = init_memory_database().await.unwrap();
        sqlx::query(
            "INSERT INTO Venue (name, city, state, seeking_talent, genres)
             VALUES ('The Musical Hop', 'San Francisco', 'CA', 1, 'Jazz,Reggae')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let venue: Venue = sqlx::query_as("SELECT * FROM Venue")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(venue.name, "The Musical Hop");
        assert!(venue.seeking_talent);
        assert_eq!(venue.address, None);
        assert_eq!(venue.genres.as_slice(), ["Jazz", "Reggae"]);
    }

    #[tokio::test]
    async fn test_show_updated_at_defaults_to_today() {
        let pool = init_memory_database().await.unwrap();
        sqlx::query("INSERT INTO Venue (name, city, state) VALUES ('V', 'C', 'CA')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO Artist (name, city, state) VALUES ('A', 'C', 'CA')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO Shows (start_time, venue_id, artist_id) VALUES ('2030-06-01 20:00:00', 1, 1)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let show: Show = sqlx::query_as("SELECT * FROM Shows")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(show.updated_at, crate::time::today());
        assert_eq!(crate::time::timestamp_text(&show.start_time), "2030-06-01 20:00:00");
    }
}
