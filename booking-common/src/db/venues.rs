//! Venue database operations
//!
//! Reads take the pool; writes take the connection of an open transaction
//! (see [`crate::mutation`]).

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::db::models::{Venue, VenueInput, VenueSummary};
use crate::error::{EntityKind, Error, Result};
use crate::genre;
use crate::schedule::{self, Counterpart, ScheduledShow};

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, website, image_link, \
                             facebook_link, genres, seeking_talent, seeking_description";

fn venue_from_row(row: &SqliteRow) -> Result<Venue> {
    let genres: String = row.get("genres");

    Ok(Venue {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        address: row.get("address"),
        phone: row.get("phone"),
        website: row.get("website"),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        genres: genre::from_column(&genres)?,
        seeking_talent: row.get("seeking_talent"),
        seeking_description: row.get("seeking_description"),
    })
}

/// Load venue by id
pub async fn get_venue(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let row = sqlx::query(&format!("SELECT {} FROM venue WHERE id = ?", VENUE_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(venue_from_row).transpose()
}

/// All venues, ordered by id
pub async fn list_venues(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let rows = sqlx::query(&format!("SELECT {} FROM venue ORDER BY id", VENUE_COLUMNS))
        .fetch_all(pool)
        .await?;

    rows.iter().map(venue_from_row).collect()
}

/// Every venue with its upcoming-show count relative to `now`, ordered by id
pub async fn venue_summaries(pool: &SqlitePool, now: &DateTime<Utc>) -> Result<Vec<VenueSummary>> {
    let venues = sqlx::query_as::<_, (i64, String, String, String)>(
        "SELECT id, name, city, state FROM venue ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let starts = sqlx::query_as::<_, (i64, DateTime<Utc>)>("SELECT venue_id, start_time FROM show")
        .fetch_all(pool)
        .await?;

    Ok(venues
        .into_iter()
        .map(|(id, name, city, state)| {
            let num_upcoming_shows = schedule::count_upcoming(
                starts.iter().filter(|(venue_id, _)| *venue_id == id).map(|(_, t)| t),
                now,
            );
            VenueSummary {
                id,
                name,
                city,
                state,
                num_upcoming_shows,
            }
        })
        .collect())
}

/// Shows held at a venue, joined with their artists
///
/// The artist side is a LEFT JOIN so a dangling reference reaches the
/// classifier as a missing counterpart instead of silently vanishing.
pub async fn shows_for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<ScheduledShow>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id, s.start_time, s.artist_id, a.id AS found_id, a.name, a.image_link
        FROM show s
        LEFT JOIN artist a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            let found: Option<i64> = row.get("found_id");
            ScheduledShow {
                show_id: row.get("id"),
                start_time: row.get("start_time"),
                counterpart_id: row.get("artist_id"),
                counterpart: found.map(|_| Counterpart {
                    name: row.get("name"),
                    image_link: row.get("image_link"),
                }),
            }
        })
        .collect())
}

/// Insert a venue, returning its id
pub async fn insert_venue(conn: &mut SqliteConnection, input: &VenueInput) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO venue (
            name, city, state, address, phone, website, image_link,
            facebook_link, genres, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.address)
    .bind(&input.phone)
    .bind(&input.website)
    .bind(&input.image_link)
    .bind(&input.facebook_link)
    .bind(genre::to_column(&input.genres)?)
    .bind(input.seeking_talent)
    .bind(&input.seeking_description)
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    debug!(venue_id = id, name = %input.name, "Inserted venue");
    Ok(id)
}

/// Replace every mutable column of a venue
pub async fn update_venue(conn: &mut SqliteConnection, id: i64, input: &VenueInput) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE venue SET
            name = ?, city = ?, state = ?, address = ?, phone = ?, website = ?,
            image_link = ?, facebook_link = ?, genres = ?, seeking_talent = ?,
            seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.address)
    .bind(&input.phone)
    .bind(&input.website)
    .bind(&input.image_link)
    .bind(&input.facebook_link)
    .bind(genre::to_column(&input.genres)?)
    .bind(input.seeking_talent)
    .bind(&input.seeking_description)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::missing(EntityKind::Venue, id));
    }
    Ok(())
}

/// Delete a venue and every show held there, returning the number of shows removed
///
/// Must run inside a transaction: the show rows go first, then the venue.
pub async fn delete_venue(conn: &mut SqliteConnection, id: i64) -> Result<u64> {
    let shows = sqlx::query("DELETE FROM show WHERE venue_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    let venues = sqlx::query("DELETE FROM venue WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    if venues == 0 {
        return Err(Error::missing(EntityKind::Venue, id));
    }

    debug!(venue_id = id, shows_removed = shows, "Deleted venue");
    Ok(shows)
}
