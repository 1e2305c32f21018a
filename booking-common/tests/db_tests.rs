//! Integration tests for the persistence layer
//!
//! Each test runs against a fresh in-memory database seeded with the sample
//! listings: venues 1-3, artists 1-3 and five shows (two in 2019, three in
//! 2035, all but one at venue 3).

use booking_common::db::{self, artists, init_memory_database, seed_sample_data, shows, venues};
use booking_common::schedule::classify;
use booking_common::{EntityKind, Error, Genre};
use chrono::{TimeZone, Utc};
use sqlx::SqlitePool;

async fn seeded() -> SqlitePool {
    let pool = init_memory_database().await.unwrap();
    assert!(seed_sample_data(&pool).await.unwrap());
    pool
}

#[tokio::test]
async fn test_seed_is_skipped_when_data_exists() {
    let pool = seeded().await;
    assert!(!seed_sample_data(&pool).await.unwrap());
    assert_eq!(venues::list_venues(&pool).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_venue_round_trips_genres_and_flags() {
    let pool = seeded().await;

    let venue = venues::get_venue(&pool, 1).await.unwrap().unwrap();
    assert_eq!(venue.name, "The Musical Hop");
    assert_eq!(venue.genres, vec![Genre::Jazz, Genre::Reggae, Genre::Classical, Genre::Folk]);
    assert!(venue.seeking_talent);

    assert!(venues::get_venue(&pool, 99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_artists_listed_by_name() {
    let pool = seeded().await;
    let names: Vec<String> = artists::list_artists(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
}

#[tokio::test]
async fn test_venue_summaries_count_upcoming_shows() {
    let pool = seeded().await;
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let summaries = venues::venue_summaries(&pool, &now).await.unwrap();
    let counts: Vec<(i64, usize)> = summaries.iter().map(|v| (v.id, v.num_upcoming_shows)).collect();
    assert_eq!(counts, vec![(1, 0), (2, 0), (3, 3)]);
}

#[tokio::test]
async fn test_venue_schedule_past_plus_upcoming_is_total() {
    let pool = seeded().await;
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let rows = venues::shows_for_venue(&pool, 3).await.unwrap();
    let total = shows::count_shows_for_venue(&pool, 3).await.unwrap();
    let schedule = classify(rows, EntityKind::Artist, &now).unwrap();

    assert_eq!(schedule.past_count(), 1);
    assert_eq!(schedule.upcoming_count(), 3);
    assert_eq!(schedule.total() as i64, total);
    assert_eq!(schedule.past[0].counterpart_name, "Matt Quevedo");
}

#[tokio::test]
async fn test_artist_schedule_joins_venues() {
    let pool = seeded().await;
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let rows = artists::shows_for_artist(&pool, 1).await.unwrap();
    let schedule = classify(rows, EntityKind::Venue, &now).unwrap();

    assert_eq!(schedule.past_count(), 1);
    assert_eq!(schedule.upcoming_count(), 0);
    assert_eq!(schedule.past[0].counterpart_name, "The Musical Hop");
    assert_eq!(schedule.past[0].start_time_display, "Tue 05, 21, 2019 9:30PM");
}

#[tokio::test]
async fn test_show_listing_newest_first() {
    let pool = seeded().await;

    let listing = shows::list_shows(&pool).await.unwrap();
    assert_eq!(listing.len(), 5);
    assert!(listing.windows(2).all(|w| w[0].start_time >= w[1].start_time));
    assert_eq!(listing[4].venue_name, "The Musical Hop");
    assert_eq!(listing[4].artist_name, "Guns N Petals");
}

#[tokio::test]
async fn test_delete_venue_cascades_to_shows() {
    let pool = seeded().await;

    let mut tx = pool.begin().await.unwrap();
    let removed = venues::delete_venue(&mut *tx, 3).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(removed, 4);
    assert!(venues::get_venue(&pool, 3).await.unwrap().is_none());
    assert_eq!(shows::count_shows_for_venue(&pool, 3).await.unwrap(), 0);
    assert_eq!(shows::list_shows(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_show_with_unknown_artist_is_constraint_violation() {
    let pool = seeded().await;

    let mut conn = pool.acquire().await.unwrap();
    let input = db::ShowInput {
        artist_id: 404,
        venue_id: 1,
        start_time: None,
    };
    let err = shows::insert_show(&mut conn, &input).await.unwrap_err();
    drop(conn);

    assert!(matches!(err, Error::ConstraintViolation(_)), "got {:?}", err);
    assert_eq!(shows::list_shows(&pool).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_insert_show_defaults_start_time_to_now() {
    let pool = seeded().await;
    let before = Utc::now() - chrono::Duration::seconds(1);

    let mut conn = pool.acquire().await.unwrap();
    let input = db::ShowInput {
        artist_id: 2,
        venue_id: 2,
        start_time: None,
    };
    let id = shows::insert_show(&mut conn, &input).await.unwrap();
    drop(conn);

    let show = shows::get_show(&pool, id).await.unwrap().unwrap();
    assert!(show.start_time >= before);
    assert!(show.start_time <= Utc::now());
}

#[tokio::test]
async fn test_update_artist_replaces_fields() {
    let pool = seeded().await;
    let mut artist = artists::get_artist(&pool, 2).await.unwrap().unwrap();
    assert!(!artist.seeking_venue);

    let input = db::ArtistInput {
        name: artist.name.clone(),
        city: "Oakland".to_string(),
        state: artist.state.clone(),
        genres: vec![Genre::Jazz],
        seeking_venue: true,
        seeking_description: Some("Looking for weekend gigs".to_string()),
        ..Default::default()
    };
    let mut conn = pool.acquire().await.unwrap();
    artists::update_artist(&mut conn, 2, &input).await.unwrap();
    drop(conn);

    artist = artists::get_artist(&pool, 2).await.unwrap().unwrap();
    assert_eq!(artist.city, "Oakland");
    assert_eq!(artist.genres, vec![Genre::Jazz]);
    assert!(artist.seeking_venue);
    assert!(artist.phone.is_none());
}
