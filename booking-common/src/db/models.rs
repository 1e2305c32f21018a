//! Database models

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::genre::Genre;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<Genre>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<Genre>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Validated values for creating or replacing a venue
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<Genre>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Validated values for creating or replacing an artist
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<Genre>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Validated values for scheduling a show
///
/// A missing start time is filled with the time of insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowInput {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: Option<DateTime<Utc>>,
}

/// Venue row reduced to what listings and search results need
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Row of the global show listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}
