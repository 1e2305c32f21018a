//! Music genre tags accepted on venue and artist forms
//!
//! Stored as their display names inside a JSON array column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the fixed set of genre tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    #[serde(rename = "Heavy Metal")]
    HeavyMetal,
    Instrumental,
    Jazz,
    #[serde(rename = "Musical Theatre")]
    MusicalTheatre,
    Pop,
    Punk,
    #[serde(rename = "R&B")]
    RnB,
    Reggae,
    #[serde(rename = "Rock n Roll")]
    RockNRoll,
    Soul,
    Other,
}

/// Token outside the genre set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} is not a valid genre")]
pub struct UnknownGenre(pub String);

impl Genre {
    /// All genres in form display order
    pub const ALL: [Genre; 19] = [
        Genre::Alternative,
        Genre::Blues,
        Genre::Classical,
        Genre::Country,
        Genre::Electronic,
        Genre::Folk,
        Genre::Funk,
        Genre::HipHop,
        Genre::HeavyMetal,
        Genre::Instrumental,
        Genre::Jazz,
        Genre::MusicalTheatre,
        Genre::Pop,
        Genre::Punk,
        Genre::RnB,
        Genre::Reggae,
        Genre::RockNRoll,
        Genre::Soul,
        Genre::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Alternative => "Alternative",
            Genre::Blues => "Blues",
            Genre::Classical => "Classical",
            Genre::Country => "Country",
            Genre::Electronic => "Electronic",
            Genre::Folk => "Folk",
            Genre::Funk => "Funk",
            Genre::HipHop => "Hip-Hop",
            Genre::HeavyMetal => "Heavy Metal",
            Genre::Instrumental => "Instrumental",
            Genre::Jazz => "Jazz",
            Genre::MusicalTheatre => "Musical Theatre",
            Genre::Pop => "Pop",
            Genre::Punk => "Punk",
            Genre::RnB => "R&B",
            Genre::Reggae => "Reggae",
            Genre::RockNRoll => "Rock n Roll",
            Genre::Soul => "Soul",
            Genre::Other => "Other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = UnknownGenre;

    /// Exact match on the display name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}

/// Encode a genre list for the `genres` column
pub fn to_column(genres: &[Genre]) -> serde_json::Result<String> {
    serde_json::to_string(genres)
}

/// Decode the `genres` column
pub fn from_column(raw: &str) -> serde_json::Result<Vec<Genre>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_display_name_parses_back() {
        for genre in Genre::ALL {
            assert_eq!(genre.as_str().parse::<Genre>(), Ok(genre));
        }
    }

    #[test]
    fn test_unknown_genre_names_token() {
        let err = "Polka".parse::<Genre>().unwrap_err();
        assert_eq!(err, UnknownGenre("Polka".to_string()));
        assert_eq!(err.to_string(), "Polka is not a valid genre");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!("jazz".parse::<Genre>().is_err());
    }

    #[test]
    fn test_column_uses_display_names() {
        let raw = to_column(&[Genre::RnB, Genre::RockNRoll]).unwrap();
        assert_eq!(raw, r#"["R&B","Rock n Roll"]"#);
        assert_eq!(from_column(&raw).unwrap(), vec![Genre::RnB, Genre::RockNRoll]);
    }

    #[test]
    fn test_empty_column_decodes_to_empty_list() {
        assert!(from_column("").unwrap().is_empty());
        assert!(from_column("[]").unwrap().is_empty());
    }
}
