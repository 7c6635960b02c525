//! Genre lists
//!
//! Genres are an ordered sequence of strings. The database column holds a JSON
//! array; older rows holding a comma-delimited string are still readable.

use serde::{Deserialize, Serialize};

/// Genre choices offered by the directory forms
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Canonical spelling of a genre choice (case-insensitive match)
pub fn canonical_choice(value: &str) -> Option<&'static str> {
    let value = value.trim();
    GENRE_CHOICES
        .iter()
        .copied()
        .find(|choice| choice.eq_ignore_ascii_case(value))
}

/// Ordered, de-duplicated list of genre names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genres(Vec<String>);

impl Genres {
    /// Normalize submitted values
    ///
    /// Each value may itself be comma-delimited. Entries are trimmed, empty
    /// entries dropped and repeats removed keeping the first occurrence.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut genres: Vec<String> = Vec::new();
        for value in values {
            for part in value.as_ref().split(',') {
                let part = part.trim();
                if !part.is_empty() && !genres.iter().any(|g| g == part) {
                    genres.push(part.to_string());
                }
            }
        }
        Self(genres)
    }

    /// Decode a stored column value (JSON array or legacy delimited text)
    pub fn from_stored(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with('[') {
            if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
                return Self::from_values(list);
            }
        }
        // Legacy rows: "Jazz,Reggae" or "{Jazz,Reggae}"
        Self::from_values([trimmed.trim_start_matches('{').trim_end_matches('}')])
    }

    /// Encode for storage as a JSON array
    pub fn to_stored(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_normalizes() {
        let genres = Genres::from_values(["Jazz", " Reggae ", "", "Jazz"]);
        assert_eq!(genres.as_slice(), ["Jazz", "Reggae"]);
    }

    #[test]
    fn test_delimited_and_repeated_agree() {
        let delimited = Genres::from_values(["Jazz,Reggae, Swing"]);
        let repeated = Genres::from_values(["Jazz", "Reggae", "Swing"]);
        assert_eq!(delimited, repeated);
    }

    #[test]
    fn test_stored_json_array() {
        let genres = Genres::from_values(["Rock n Roll", "R&B"]);
        let stored = genres.to_stored();
        assert_eq!(stored, r#"["Rock n Roll","R&B"]"#);
        assert_eq!(Genres::from_stored(&stored), genres);
    }

    #[test]
    fn test_stored_legacy_text() {
        assert_eq!(Genres::from_stored("Jazz,Classical").as_slice(), ["Jazz", "Classical"]);
        assert_eq!(Genres::from_stored("{Jazz,Classical}").as_slice(), ["Jazz", "Classical"]);
        assert!(Genres::from_stored("").is_empty());
    }

    #[test]
    fn test_canonical_choice() {
        assert_eq!(canonical_choice("hip-hop"), Some("Hip-Hop"));
        assert_eq!(canonical_choice(" r&b "), Some("R&B"));
        assert_eq!(canonical_choice("Polka"), None);
    }
}
