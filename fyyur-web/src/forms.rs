//! Form validation
//!
//! Submitted fields are validated in full before any record is built. A
//! failed validation returns the submitted values back together with the
//! per-field messages so the form can be shown again.

use chrono::NaiveDateTime;
use fyyur_common::db::{Artist, NewArtist, NewShow, NewVenue, Venue};
use fyyur_common::genres::{canonical_choice, GENRE_CHOICES};
use fyyur_common::time::{parse_timestamp, timestamp_text};
use fyyur_common::Genres;
use serde::Serialize;
use std::collections::BTreeMap;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";

/// Two-letter codes accepted for the `state` field
pub const STATE_CHOICES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Choice lists sent with every form payload
#[derive(Debug, Clone, Serialize)]
pub struct FormChoices {
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

pub const CHOICES: FormChoices = FormChoices {
    genres: GENRE_CHOICES,
    states: STATE_CHOICES,
};

/// Raw urlencoded fields in submission order (keys may repeat)
#[derive(Debug, Clone, Default)]
pub struct RawForm {
    fields: Vec<(String, String)>,
}

impl RawForm {
    pub fn from_pairs(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// First value of a field, trimmed; empty counts as absent
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Every value submitted under a field name
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

/// Field name → messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

/// Rejected submission: the values as submitted plus what is wrong with them
#[derive(Debug, Clone, Serialize)]
pub struct Invalid<F> {
    pub form: F,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub genres: Vec<String>,
}

impl VenueForm {
    pub fn from_record(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone().unwrap_or_default(),
            phone: venue.phone.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
            genres: venue.genres.as_slice().to_vec(),
        }
    }

    pub fn parse(raw: &RawForm) -> Result<NewVenue, Invalid<VenueForm>> {
        let mut errors = FieldErrors::default();

        let name = required(raw, "name", &mut errors);
        let city = required(raw, "city", &mut errors);
        let state = state_field(raw, &mut errors);
        let address = required(raw, "address", &mut errors);
        let phone = phone_field(raw, &mut errors);
        let image_link = url_field(raw, "image_link", &mut errors);
        let facebook_link = url_field(raw, "facebook_link", &mut errors);
        let website = url_field(raw, "website_link", &mut errors);
        let seeking_talent = flag_field(raw, "seeking_talent", &mut errors);
        let seeking_description = raw.text("seeking_description");
        let genres = genres_field(raw, &mut errors);

        if !errors.is_empty() {
            return Err(Invalid {
                form: VenueForm {
                    name,
                    city,
                    state,
                    address,
                    phone: raw.text("phone").unwrap_or_default(),
                    image_link: raw.text("image_link").unwrap_or_default(),
                    facebook_link: raw.text("facebook_link").unwrap_or_default(),
                    website_link: raw.text("website_link").unwrap_or_default(),
                    seeking_talent,
                    seeking_description: seeking_description.unwrap_or_default(),
                    genres: raw_genres(raw),
                },
                errors,
            });
        }

        Ok(NewVenue {
            name,
            city,
            state,
            address: Some(address),
            phone,
            image_link,
            facebook_link,
            website,
            seeking_talent,
            seeking_description,
            genres,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub genres: Vec<String>,
}

impl ArtistForm {
    pub fn from_record(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
            genres: artist.genres.as_slice().to_vec(),
        }
    }

    pub fn parse(raw: &RawForm) -> Result<NewArtist, Invalid<ArtistForm>> {
        let mut errors = FieldErrors::default();

        let name = required(raw, "name", &mut errors);
        let city = required(raw, "city", &mut errors);
        let state = state_field(raw, &mut errors);
        let phone = phone_field(raw, &mut errors);
        let image_link = url_field(raw, "image_link", &mut errors);
        let facebook_link = url_field(raw, "facebook_link", &mut errors);
        let website = url_field(raw, "website_link", &mut errors);
        let seeking_venue = flag_field(raw, "seeking_venue", &mut errors);
        let seeking_description = raw.text("seeking_description");
        let genres = genres_field(raw, &mut errors);

        if !errors.is_empty() {
            return Err(Invalid {
                form: ArtistForm {
                    name,
                    city,
                    state,
                    phone: raw.text("phone").unwrap_or_default(),
                    image_link: raw.text("image_link").unwrap_or_default(),
                    facebook_link: raw.text("facebook_link").unwrap_or_default(),
                    website_link: raw.text("website_link").unwrap_or_default(),
                    seeking_venue,
                    seeking_description: seeking_description.unwrap_or_default(),
                    genres: raw_genres(raw),
                },
                errors,
            });
        }

        Ok(NewArtist {
            name,
            city,
            state,
            phone,
            image_link,
            facebook_link,
            website,
            seeking_venue,
            seeking_description,
            genres,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    /// Empty form with the start time preset to `now`
    pub fn starting_at(now: NaiveDateTime) -> Self {
        Self {
            start_time: timestamp_text(&now),
            ..Default::default()
        }
    }

    pub fn from_record(show: &fyyur_common::db::Show) -> Self {
        Self {
            artist_id: show.artist_id.to_string(),
            venue_id: show.venue_id.to_string(),
            start_time: timestamp_text(&show.start_time),
        }
    }

    /// Structural checks only; whether the ids exist is checked by the caller
    pub fn parse(raw: &RawForm) -> Result<NewShow, Invalid<ShowForm>> {
        let mut errors = FieldErrors::default();

        let artist_id = id_field(raw, "artist_id", &mut errors);
        let venue_id = id_field(raw, "venue_id", &mut errors);
        let start_time = match raw.text("start_time") {
            None => {
                errors.add("start_time", REQUIRED);
                None
            }
            Some(value) => {
                let parsed = parse_timestamp(&value);
                if parsed.is_none() {
                    errors.add("start_time", "Not a valid datetime value.");
                }
                parsed
            }
        };

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
                Ok(NewShow {
                    venue_id,
                    artist_id,
                    start_time,
                })
            }
            _ => Err(Invalid {
                form: Self::echo(raw),
                errors,
            }),
        }
    }

    /// Submitted values as-is, for showing the form again
    pub fn echo(raw: &RawForm) -> Self {
        Self {
            artist_id: raw.text("artist_id").unwrap_or_default(),
            venue_id: raw.text("venue_id").unwrap_or_default(),
            start_time: raw.text("start_time").unwrap_or_default(),
        }
    }
}

fn required(raw: &RawForm, field: &str, errors: &mut FieldErrors) -> String {
    match raw.text(field) {
        Some(value) => value,
        None => {
            errors.add(field, REQUIRED);
            String::new()
        }
    }
}

fn state_field(raw: &RawForm, errors: &mut FieldErrors) -> String {
    let Some(value) = raw.text("state") else {
        errors.add("state", REQUIRED);
        return String::new();
    };
    let upper = value.to_ascii_uppercase();
    if STATE_CHOICES.contains(&upper.as_str()) {
        upper
    } else {
        errors.add("state", INVALID_CHOICE);
        value
    }
}

/// Accepts `NNN-NNN-NNNN` with `-`, `.` or space separators; stored with `-`
fn phone_field(raw: &RawForm, errors: &mut FieldErrors) -> Option<String> {
    let value = raw.text("phone")?;
    if let Some(normalized) = normalize_phone(&value) {
        Some(normalized)
    } else {
        errors.add("phone", "Invalid phone number. Use the format xxx-xxx-xxxx.");
        None
    }
}

fn normalize_phone(value: &str) -> Option<String> {
    let groups: Vec<&str> = value.split(['-', '.', ' ']).collect();
    let digits: String = groups.concat();

    let grouped_ok = groups.len() == 1
        || (groups.len() == 3 && groups[0].len() == 3 && groups[1].len() == 3 && groups[2].len() == 4);

    if !grouped_ok || digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(format!("{}-{}-{}", &digits[0..3], &digits[3..6], &digits[6..]))
}

fn url_field(raw: &RawForm, field: &str, errors: &mut FieldErrors) -> Option<String> {
    let value = raw.text(field)?;
    if is_http_url(&value) {
        Some(value)
    } else {
        errors.add(field, "Invalid URL.");
        None
    }
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));

    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn flag_field(raw: &RawForm, field: &str, errors: &mut FieldErrors) -> bool {
    let Some(value) = raw.text(field) else {
        return false;
    };
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "on" | "1" => true,
        "n" | "no" | "false" | "off" | "0" => false,
        _ => {
            errors.add(field, "Not a valid boolean value.");
            false
        }
    }
}

fn raw_genres(raw: &RawForm) -> Vec<String> {
    Genres::from_values(raw.values("genres")).as_slice().to_vec()
}

fn genres_field(raw: &RawForm, errors: &mut FieldErrors) -> Genres {
    let submitted = Genres::from_values(raw.values("genres"));
    if submitted.is_empty() {
        errors.add("genres", REQUIRED);
        return submitted;
    }

    let mut canonical = Vec::with_capacity(submitted.len());
    for genre in submitted.as_slice() {
        match canonical_choice(genre) {
            Some(choice) => canonical.push(choice),
            None => errors.add("genres", format!("'{}' is not a valid choice.", genre)),
        }
    }
    Genres::from_values(canonical)
}

fn id_field(raw: &RawForm, field: &str, errors: &mut FieldErrors) -> Option<i64> {
    let Some(value) = raw.text(field) else {
        errors.add(field, REQUIRED);
        return None;
    };
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, "Not a valid integer value.");
            None
        }
    }
}
