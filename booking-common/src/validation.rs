//! Form validation and explicit form-to-entity mapping
//!
//! Submitted forms arrive as ordered key/value pairs (multi-selects repeat
//! their key). Each `*_input` function checks every field, collects all
//! problems, and only then maps the values field by field into an input
//! struct. Nothing here touches the database.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::db::models::{Artist, ArtistInput, ShowInput, Venue, VenueInput};
use crate::genre::Genre;

/// Length ceiling for most text fields
pub const SHORT_TEXT_MAX: usize = 120;

/// Length ceiling for descriptions and artist image links
pub const LONG_TEXT_MAX: usize = 500;

/// Accepted values for the `state` select field
pub const US_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Date-time layouts accepted for `start_time`, tried in order
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Layout used when pre-filling `start_time`
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*://(?P<host>[^/?#:\s]+)(?::[0-9]+)?(?:[/?#]\S*)?$")
        .expect("URL pattern is valid")
});

/// Submitted form values in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted under `key`, in order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Trimmed first value, empty when absent
    pub fn text(&self, key: &str) -> &str {
        self.get(key).map(str::trim).unwrap_or("")
    }

    /// Checkbox semantics: present and not "" / "false"
    pub fn checked(&self, key: &str) -> bool {
        matches!(self.get(key), Some(v) if !v.is_empty() && !v.eq_ignore_ascii_case("false"))
    }

    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

/// A single problem with a single field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Field cannot be longer than {max} characters.")]
    TooLong { max: usize },

    #[error("Invalid URL.")]
    InvalidUrl,

    /// Genre token outside the allowed set
    #[error("{0} is not a valid genre. Please select one or more of the options above")]
    InvalidGenre(String),

    #[error("Not a valid choice.")]
    InvalidChoice,

    #[error("Not a valid integer value.")]
    InvalidInteger,

    #[error("Not a valid datetime value.")]
    InvalidDateTime,
}

/// Every field problem found in one submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(&'static str, FieldError)>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, error: FieldError) {
        self.errors.push((field, error));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, FieldError)> {
        self.errors.iter()
    }

    /// Problems attached to one field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors
            .iter()
            .filter(move |(f, _)| *f == field)
            .map(|(_, e)| e)
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|(f, _)| *f == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// True when `value` looks like `scheme://host.tld[:port][/path][?query]`
pub fn is_valid_url(value: &str) -> bool {
    URL_PATTERN
        .captures(value)
        .and_then(|caps| caps.name("host"))
        .map(|host| {
            let host = host.as_str();
            match host.rsplit_once('.') {
                Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
                None => false,
            }
        })
        .unwrap_or(false)
}

/// Parse a submitted start time as UTC
pub fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Accumulates field problems while reading a form
struct Checker<'a> {
    form: &'a FormData,
    errors: ValidationErrors,
}

impl<'a> Checker<'a> {
    fn new(form: &'a FormData) -> Self {
        Self {
            form,
            errors: ValidationErrors::default(),
        }
    }

    fn length(&mut self, field: &'static str, value: &str, max: usize) -> bool {
        if value.chars().count() > max {
            self.errors.push(field, FieldError::TooLong { max });
            return false;
        }
        true
    }

    fn required(&mut self, field: &'static str, max: usize) -> String {
        let form = self.form;
        let value = form.text(field);
        if value.is_empty() {
            self.errors.push(field, FieldError::Required);
        } else {
            self.length(field, value, max);
        }
        value.to_string()
    }

    fn optional(&mut self, field: &'static str, max: usize) -> Option<String> {
        let form = self.form;
        let value = form.text(field);
        if value.is_empty() {
            return None;
        }
        self.length(field, value, max);
        Some(value.to_string())
    }

    fn url(&mut self, field: &'static str, max: usize, required: bool) -> Option<String> {
        let form = self.form;
        let value = form.text(field);
        if value.is_empty() {
            if required {
                self.errors.push(field, FieldError::Required);
            }
            return None;
        }
        if !is_valid_url(value) {
            self.errors.push(field, FieldError::InvalidUrl);
        }
        self.length(field, value, max);
        Some(value.to_string())
    }

    fn state(&mut self) -> String {
        let value = self.required("state", SHORT_TEXT_MAX);
        if !value.is_empty() && !US_STATES.contains(&value.as_str()) {
            self.errors.push("state", FieldError::InvalidChoice);
        }
        value
    }

    fn genres(&mut self) -> Vec<Genre> {
        let form = self.form;
        let tokens: Vec<&str> = form
            .get_all("genres")
            .into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            self.errors.push("genres", FieldError::Required);
            return Vec::new();
        }

        let mut genres = Vec::with_capacity(tokens.len());
        for token in tokens {
            match token.parse::<Genre>() {
                Ok(genre) if !genres.contains(&genre) => genres.push(genre),
                Ok(_) => {}
                Err(unknown) => self.errors.push("genres", FieldError::InvalidGenre(unknown.0)),
            }
        }
        genres
    }

    fn id(&mut self, field: &'static str) -> i64 {
        let form = self.form;
        let value = form.text(field);
        if value.is_empty() {
            self.errors.push(field, FieldError::Required);
            return 0;
        }
        value.parse::<i64>().unwrap_or_else(|_| {
            self.errors.push(field, FieldError::InvalidInteger);
            0
        })
    }

    fn start_time(&mut self) -> Option<DateTime<Utc>> {
        let form = self.form;
        let value = form.text("start_time");
        if value.is_empty() {
            self.errors.push("start_time", FieldError::Required);
            return None;
        }
        let parsed = parse_start_time(value);
        if parsed.is_none() {
            self.errors.push("start_time", FieldError::InvalidDateTime);
        }
        parsed
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

/// Validate a venue form and map it to a [`VenueInput`]
pub fn venue_input(form: &FormData) -> Result<VenueInput, ValidationErrors> {
    let mut check = Checker::new(form);

    let name = check.required("name", SHORT_TEXT_MAX);
    let city = check.required("city", SHORT_TEXT_MAX);
    let state = check.state();
    let address = check.required("address", SHORT_TEXT_MAX);
    let phone = check.optional("phone", SHORT_TEXT_MAX);
    let image_link = check.url("image_link", SHORT_TEXT_MAX, true);
    let genres = check.genres();
    let facebook_link = check.url("facebook_link", SHORT_TEXT_MAX, false);
    let website = check.url("website_link", SHORT_TEXT_MAX, false);
    let seeking_talent = form.checked("seeking_talent");
    let seeking_description = check.optional("seeking_description", LONG_TEXT_MAX);

    check.finish(VenueInput {
        name,
        city,
        state,
        address,
        phone,
        website,
        image_link,
        facebook_link,
        genres,
        seeking_talent,
        seeking_description,
    })
}

/// Validate an artist form and map it to an [`ArtistInput`]
pub fn artist_input(form: &FormData) -> Result<ArtistInput, ValidationErrors> {
    let mut check = Checker::new(form);

    let name = check.required("name", SHORT_TEXT_MAX);
    let city = check.required("city", SHORT_TEXT_MAX);
    let state = check.state();
    let phone = check.optional("phone", SHORT_TEXT_MAX);
    let image_link = check.url("image_link", LONG_TEXT_MAX, true);
    let genres = check.genres();
    let facebook_link = check.url("facebook_link", SHORT_TEXT_MAX, false);
    let website = check.url("website_link", SHORT_TEXT_MAX, false);
    let seeking_venue = form.checked("seeking_venue");
    let seeking_description = check.optional("seeking_description", LONG_TEXT_MAX);

    check.finish(ArtistInput {
        name,
        city,
        state,
        phone,
        website,
        image_link,
        facebook_link,
        genres,
        seeking_venue,
        seeking_description,
    })
}

/// Validate a show form and map it to a [`ShowInput`]
pub fn show_input(form: &FormData) -> Result<ShowInput, ValidationErrors> {
    let mut check = Checker::new(form);

    let artist_id = check.id("artist_id");
    let venue_id = check.id("venue_id");
    let start_time = check.start_time();

    check.finish(ShowInput {
        artist_id,
        venue_id,
        start_time,
    })
}

fn push_optional(form: &mut FormData, key: &str, value: &Option<String>) {
    form.push(key, value.clone().unwrap_or_default());
}

fn push_genres(form: &mut FormData, genres: &[Genre]) {
    for genre in genres {
        form.push("genres", genre.as_str());
    }
}

/// Form values that pre-fill the venue edit page
pub fn venue_form(venue: &Venue) -> FormData {
    let mut form = FormData::default();
    form.push("name", venue.name.as_str());
    form.push("city", venue.city.as_str());
    form.push("state", venue.state.as_str());
    form.push("address", venue.address.as_str());
    push_optional(&mut form, "phone", &venue.phone);
    push_optional(&mut form, "image_link", &venue.image_link);
    push_genres(&mut form, &venue.genres);
    push_optional(&mut form, "facebook_link", &venue.facebook_link);
    push_optional(&mut form, "website_link", &venue.website);
    if venue.seeking_talent {
        form.push("seeking_talent", "y");
    }
    push_optional(&mut form, "seeking_description", &venue.seeking_description);
    form
}

/// Form values that pre-fill the artist edit page
pub fn artist_form(artist: &Artist) -> FormData {
    let mut form = FormData::default();
    form.push("name", artist.name.as_str());
    form.push("city", artist.city.as_str());
    form.push("state", artist.state.as_str());
    push_optional(&mut form, "phone", &artist.phone);
    push_optional(&mut form, "image_link", &artist.image_link);
    push_genres(&mut form, &artist.genres);
    push_optional(&mut form, "facebook_link", &artist.facebook_link);
    push_optional(&mut form, "website_link", &artist.website);
    if artist.seeking_venue {
        form.push("seeking_venue", "y");
    }
    push_optional(&mut form, "seeking_description", &artist.seeking_description);
    form
}

/// Blank show form with the start time set to `now`
pub fn show_form(now: DateTime<Utc>) -> FormData {
    let mut form = FormData::default();
    form.push("start_time", now.format(DATETIME_INPUT_FORMAT).to_string());
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn venue_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", "123-123-1234"),
            ("image_link", "https://images.example.com/hop.jpg"),
            ("genres", "Jazz"),
            ("genres", "Reggae"),
            ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
            ("website_link", ""),
            ("seeking_talent", "y"),
            ("seeking_description", "Looking for local artists"),
        ]
    }

    #[test]
    fn test_valid_venue_maps_every_field() {
        let input = venue_input(&form(&venue_pairs())).expect("venue should validate");

        assert_eq!(input.name, "The Musical Hop");
        assert_eq!(input.city, "San Francisco");
        assert_eq!(input.state, "CA");
        assert_eq!(input.address, "1015 Folsom Street");
        assert_eq!(input.phone.as_deref(), Some("123-123-1234"));
        assert_eq!(input.genres, vec![Genre::Jazz, Genre::Reggae]);
        assert_eq!(input.website, None);
        assert!(input.seeking_talent);
        assert_eq!(
            input.seeking_description.as_deref(),
            Some("Looking for local artists")
        );
    }

    #[test]
    fn test_empty_name_is_required_error() {
        let mut pairs = venue_pairs();
        pairs[0] = ("name", "   ");
        let errors = venue_input(&form(&pairs)).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.for_field("name").next(), Some(&FieldError::Required));
    }

    #[test]
    fn test_all_problems_reported_together() {
        let errors = venue_input(&FormData::default()).unwrap_err();
        for field in ["name", "city", "state", "address", "image_link", "genres"] {
            assert!(errors.has(field), "expected error on {}", field);
        }
        assert!(!errors.has("phone"));
    }

    #[test]
    fn test_invalid_genre_names_token() {
        let mut pairs = venue_pairs();
        pairs.push(("genres", "Polka"));
        let errors = venue_input(&form(&pairs)).unwrap_err();

        let genre_errors: Vec<_> = errors.for_field("genres").collect();
        assert_eq!(genre_errors, vec![&FieldError::InvalidGenre("Polka".to_string())]);
        assert!(genre_errors[0].to_string().starts_with("Polka is not a valid genre"));
    }

    #[test]
    fn test_length_ceilings() {
        let long_name = "x".repeat(121);
        let long_description = "y".repeat(501);
        let mut pairs = venue_pairs();
        pairs[0] = ("name", long_name.as_str());
        pairs[11] = ("seeking_description", long_description.as_str());
        let errors = venue_input(&form(&pairs)).unwrap_err();

        assert_eq!(
            errors.for_field("name").next(),
            Some(&FieldError::TooLong { max: 120 })
        );
        assert_eq!(
            errors.for_field("seeking_description").next(),
            Some(&FieldError::TooLong { max: 500 })
        );
    }

    #[test]
    fn test_exactly_at_ceiling_is_accepted() {
        let name = "x".repeat(120);
        let mut pairs = venue_pairs();
        pairs[0] = ("name", name.as_str());
        assert!(venue_input(&form(&pairs)).is_ok());
    }

    #[test]
    fn test_artist_image_link_allows_500_chars() {
        let link = format!("https://images.example.com/{}", "a".repeat(300));
        let artist = form(&[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("image_link", link.as_str()),
            ("genres", "Rock n Roll"),
        ]);
        let input = artist_input(&artist).expect("artist should validate");
        assert_eq!(input.image_link.as_deref(), Some(link.as_str()));
        assert!(!input.seeking_venue);
    }

    #[test]
    fn test_unknown_state_is_invalid_choice() {
        let mut pairs = venue_pairs();
        pairs[2] = ("state", "ZZ");
        let errors = venue_input(&form(&pairs)).unwrap_err();
        assert_eq!(errors.for_field("state").next(), Some(&FieldError::InvalidChoice));
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut pairs = venue_pairs();
        pairs[8] = ("facebook_link", "facebook dot com");
        let errors = venue_input(&form(&pairs)).unwrap_err();
        assert_eq!(errors.for_field("facebook_link").next(), Some(&FieldError::InvalidUrl));
    }

    #[test]
    fn test_url_shapes() {
        assert!(is_valid_url("https://www.example.com"));
        assert!(is_valid_url("http://example.com:8080/path?q=1"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("https://localhost"));
        assert!(!is_valid_url("https://exa mple.com"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_show_input_parses_ids_and_time() {
        let input = show_input(&form(&[
            ("artist_id", "4"),
            ("venue_id", "1"),
            ("start_time", "2019-05-21 21:30:00"),
        ]))
        .expect("show should validate");

        assert_eq!(input.artist_id, 4);
        assert_eq!(input.venue_id, 1);
        assert_eq!(
            input.start_time.map(|t| t.to_rfc3339()),
            Some("2019-05-21T21:30:00+00:00".to_string())
        );
    }

    #[test]
    fn test_show_input_rejects_garbage() {
        let errors = show_input(&form(&[
            ("artist_id", "four"),
            ("venue_id", ""),
            ("start_time", "next tuesday"),
        ]))
        .unwrap_err();

        assert_eq!(errors.for_field("artist_id").next(), Some(&FieldError::InvalidInteger));
        assert_eq!(errors.for_field("venue_id").next(), Some(&FieldError::Required));
        assert_eq!(errors.for_field("start_time").next(), Some(&FieldError::InvalidDateTime));
    }

    #[test]
    fn test_datetime_local_layout_accepted() {
        assert!(parse_start_time("2035-04-01T20:00").is_some());
    }

    #[test]
    fn test_checkbox_semantics() {
        let data = form(&[("a", "y"), ("b", ""), ("c", "false")]);
        assert!(data.checked("a"));
        assert!(!data.checked("b"));
        assert!(!data.checked("c"));
        assert!(!data.checked("missing"));
    }

    #[test]
    fn test_edit_form_round_trips_through_validation() {
        let input = venue_input(&form(&venue_pairs())).unwrap();
        let venue = Venue {
            id: 1,
            name: input.name.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            address: input.address.clone(),
            phone: input.phone.clone(),
            website: input.website.clone(),
            image_link: input.image_link.clone(),
            facebook_link: input.facebook_link.clone(),
            genres: input.genres.clone(),
            seeking_talent: input.seeking_talent,
            seeking_description: input.seeking_description.clone(),
        };

        assert_eq!(venue_input(&venue_form(&venue)), Ok(input));
    }
}
