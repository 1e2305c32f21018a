//! Artist database operations

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::db::models::{Artist, ArtistInput, ArtistSummary};
use crate::error::{EntityKind, Error, Result};
use crate::genre;
use crate::schedule::{self, Counterpart, ScheduledShow};

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, website, image_link, \
                              facebook_link, genres, seeking_venue, seeking_description";

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    let genres: String = row.get("genres");

    Ok(Artist {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        phone: row.get("phone"),
        website: row.get("website"),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        genres: genre::from_column(&genres)?,
        seeking_venue: row.get("seeking_venue"),
        seeking_description: row.get("seeking_description"),
    })
}

/// Load artist by id
pub async fn get_artist(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let row = sqlx::query(&format!("SELECT {} FROM artist WHERE id = ?", ARTIST_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(artist_from_row).transpose()
}

/// All artists, ordered by name
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM artist ORDER BY name, id",
        ARTIST_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(artist_from_row).collect()
}

/// Every artist with its upcoming-show count relative to `now`, ordered by id
pub async fn artist_summaries(pool: &SqlitePool, now: &DateTime<Utc>) -> Result<Vec<ArtistSummary>> {
    let artists = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM artist ORDER BY id")
        .fetch_all(pool)
        .await?;

    let starts = sqlx::query_as::<_, (i64, DateTime<Utc>)>("SELECT artist_id, start_time FROM show")
        .fetch_all(pool)
        .await?;

    Ok(artists
        .into_iter()
        .map(|(id, name)| ArtistSummary {
            id,
            name,
            num_upcoming_shows: schedule::count_upcoming(
                starts.iter().filter(|(artist_id, _)| *artist_id == id).map(|(_, t)| t),
                now,
            ),
        })
        .collect())
}

/// Shows an artist plays, joined with their venues
pub async fn shows_for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<ScheduledShow>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id, s.start_time, s.venue_id, v.id AS found_id, v.name, v.image_link
        FROM show s
        LEFT JOIN venue v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            let found: Option<i64> = row.get("found_id");
            ScheduledShow {
                show_id: row.get("id"),
                start_time: row.get("start_time"),
                counterpart_id: row.get("venue_id"),
                counterpart: found.map(|_| Counterpart {
                    name: row.get("name"),
                    image_link: row.get("image_link"),
                }),
            }
        })
        .collect())
}

/// Insert an artist, returning its id
pub async fn insert_artist(conn: &mut SqliteConnection, input: &ArtistInput) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO artist (
            name, city, state, phone, website, image_link,
            facebook_link, genres, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.website)
    .bind(&input.image_link)
    .bind(&input.facebook_link)
    .bind(genre::to_column(&input.genres)?)
    .bind(input.seeking_venue)
    .bind(&input.seeking_description)
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    debug!(artist_id = id, name = %input.name, "Inserted artist");
    Ok(id)
}

/// Replace every mutable column of an artist
pub async fn update_artist(conn: &mut SqliteConnection, id: i64, input: &ArtistInput) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE artist SET
            name = ?, city = ?, state = ?, phone = ?, website = ?, image_link = ?,
            facebook_link = ?, genres = ?, seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.website)
    .bind(&input.image_link)
    .bind(&input.facebook_link)
    .bind(genre::to_column(&input.genres)?)
    .bind(input.seeking_venue)
    .bind(&input.seeking_description)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::missing(EntityKind::Artist, id));
    }
    Ok(())
}
