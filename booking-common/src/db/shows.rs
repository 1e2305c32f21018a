//! Show database operations

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::db::models::{Show, ShowInput, ShowListing};
use crate::error::{EntityKind, Error, Result};

/// Load show by id
pub async fn get_show(pool: &SqlitePool, id: i64) -> Result<Option<Show>> {
    let row = sqlx::query_as::<_, (i64, i64, i64, DateTime<Utc>)>(
        "SELECT id, artist_id, venue_id, start_time FROM show WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, artist_id, venue_id, start_time)| Show {
        id,
        artist_id,
        venue_id,
        start_time,
    }))
}

/// Global show listing, latest start time first
///
/// Every show must resolve both its venue and its artist; a dangling
/// reference fails the listing with [`Error::MissingReference`].
pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id, s.start_time, s.venue_id, s.artist_id,
               v.name AS venue_name, a.name AS artist_name, a.image_link AS artist_image_link
        FROM show s
        LEFT JOIN venue v ON v.id = s.venue_id
        LEFT JOIN artist a ON a.id = s.artist_id
        ORDER BY s.start_time DESC, s.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<ShowListing> {
            let venue_id: i64 = row.get("venue_id");
            let artist_id: i64 = row.get("artist_id");
            let venue_name: Option<String> = row.get("venue_name");
            let artist_name: Option<String> = row.get("artist_name");

            Ok(ShowListing {
                id: row.get("id"),
                venue_name: venue_name.ok_or_else(|| Error::missing(EntityKind::Venue, venue_id))?,
                artist_name: artist_name
                    .ok_or_else(|| Error::missing(EntityKind::Artist, artist_id))?,
                venue_id,
                artist_id,
                artist_image_link: row.get("artist_image_link"),
                start_time: row.get("start_time"),
            })
        })
        .collect()
}

/// Number of shows held at a venue
pub async fn count_shows_for_venue(pool: &SqlitePool, venue_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM show WHERE venue_id = ?")
        .bind(venue_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert a show, returning its id
///
/// Without a start time the show starts now (whole seconds). A nonexistent
/// artist or venue id fails with [`Error::ConstraintViolation`].
pub async fn insert_show(conn: &mut SqliteConnection, input: &ShowInput) -> Result<i64> {
    let start_time = input
        .start_time
        .unwrap_or_else(|| Utc::now().trunc_subsecs(0));

    let result = sqlx::query("INSERT INTO show (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(input.artist_id)
        .bind(input.venue_id)
        .bind(start_time)
        .execute(&mut *conn)
        .await?;

    let id = result.last_insert_rowid();
    debug!(
        show_id = id,
        artist_id = input.artist_id,
        venue_id = input.venue_id,
        "Inserted show"
    );
    Ok(id)
}
