//! Sample listings for a fresh database
//!
//! Three venues, three artists and five shows: two in 2019 and three in
//! 2035, so both past and upcoming lists have content.

use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::db::models::{ArtistInput, ShowInput, VenueInput};
use crate::db::{artists, shows, venues};
use crate::genre::Genre;
use crate::Result;

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0).single()
}

fn sample_venues() -> Vec<VenueInput> {
    vec![
        VenueInput {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: Some("123-123-1234".to_string()),
            website: Some("https://www.themusicalhop.com".to_string()),
            image_link: Some("https://images.example.com/venues/musical-hop.jpg".to_string()),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            genres: vec![Genre::Jazz, Genre::Reggae, Genre::Classical, Genre::Folk],
            seeking_talent: true,
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .to_string(),
            ),
        },
        VenueInput {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            phone: Some("914-003-1132".to_string()),
            website: Some("https://www.theduelingpianos.com".to_string()),
            image_link: Some("https://images.example.com/venues/dueling-pianos.jpg".to_string()),
            facebook_link: Some("https://www.facebook.com/theduelingpianos".to_string()),
            genres: vec![Genre::Classical, Genre::RnB, Genre::HipHop],
            seeking_talent: false,
            seeking_description: None,
        },
        VenueInput {
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            phone: Some("415-000-1234".to_string()),
            website: Some("https://www.parksquarelivemusicandcoffee.com".to_string()),
            image_link: Some("https://images.example.com/venues/park-square.jpg".to_string()),
            facebook_link: Some(
                "https://www.facebook.com/ParkSquareLiveMusicAndCoffee".to_string(),
            ),
            genres: vec![Genre::RockNRoll, Genre::Jazz, Genre::Classical, Genre::Folk],
            seeking_talent: false,
            seeking_description: None,
        },
    ]
}

fn sample_artists() -> Vec<ArtistInput> {
    vec![
        ArtistInput {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("326-123-5000".to_string()),
            website: Some("https://www.gunsnpetalsband.com".to_string()),
            image_link: Some("https://images.example.com/artists/guns-n-petals.jpg".to_string()),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".to_string()),
            genres: vec![Genre::RockNRoll],
            seeking_venue: true,
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".to_string(),
            ),
        },
        ArtistInput {
            name: "Matt Quevedo".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: Some("300-400-5000".to_string()),
            website: None,
            image_link: Some("https://images.example.com/artists/matt-quevedo.jpg".to_string()),
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".to_string()),
            genres: vec![Genre::Jazz],
            seeking_venue: false,
            seeking_description: None,
        },
        ArtistInput {
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("432-325-5432".to_string()),
            website: None,
            image_link: Some("https://images.example.com/artists/wild-sax-band.jpg".to_string()),
            facebook_link: None,
            genres: vec![Genre::Jazz, Genre::Classical],
            seeking_venue: false,
            seeking_description: None,
        },
    ]
}

/// Insert the sample listings when the database has no venues or artists
///
/// Returns false when data already existed and nothing was written.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<bool> {
    let existing: i64 =
        sqlx::query_scalar("SELECT (SELECT COUNT(*) FROM venue) + (SELECT COUNT(*) FROM artist)")
            .fetch_one(pool)
            .await?;
    if existing > 0 {
        info!("Database already has listings, skipping sample data");
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let mut venue_ids = Vec::new();
    for venue in sample_venues() {
        venue_ids.push(venues::insert_venue(&mut *tx, &venue).await?);
    }

    let mut artist_ids = Vec::new();
    for artist in sample_artists() {
        artist_ids.push(artists::insert_artist(&mut *tx, &artist).await?);
    }

    // (venue index, artist index, start)
    let schedule = [
        (0, 0, at(2019, 5, 21, 21, 30)),
        (2, 1, at(2019, 6, 15, 23, 0)),
        (2, 2, at(2035, 4, 1, 20, 0)),
        (2, 2, at(2035, 4, 8, 20, 0)),
        (2, 2, at(2035, 4, 15, 20, 0)),
    ];
    for (venue, artist, start_time) in schedule {
        let show = ShowInput {
            artist_id: artist_ids[artist],
            venue_id: venue_ids[venue],
            start_time,
        };
        shows::insert_show(&mut *tx, &show).await?;
    }

    tx.commit().await?;

    info!(
        venues = venue_ids.len(),
        artists = artist_ids.len(),
        shows = schedule.len(),
        "Inserted sample listings"
    );
    Ok(true)
}
