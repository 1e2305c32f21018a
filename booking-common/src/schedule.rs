//! Past/upcoming classification of shows
//!
//! A venue's shows are listed with their artists, an artist's shows with
//! their venues; the "counterpart" is whichever side is not the page owner.
//! Shows starting exactly at `now` count as upcoming, so every show lands in
//! exactly one side.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{EntityKind, Error, Result};
use crate::time;

/// Side of the partition a show falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    Past,
    Upcoming,
}

/// Display fields of the entity on the other end of a show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterpart {
    pub name: String,
    pub image_link: Option<String>,
}

/// Show row joined with its counterpart, as read from the store
///
/// `counterpart` is `None` when the referenced row is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledShow {
    pub show_id: i64,
    pub start_time: DateTime<Utc>,
    pub counterpart_id: i64,
    pub counterpart: Option<Counterpart>,
}

/// One line of a past or upcoming list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowEntry {
    pub show_id: i64,
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    /// Start time in the detail-page format
    pub start_time_display: String,
}

/// Shows split around a reference instant
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    pub past: Vec<ShowEntry>,
    pub upcoming: Vec<ShowEntry>,
}

impl Schedule {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn total(&self) -> usize {
        self.past.len() + self.upcoming.len()
    }
}

/// Classify one start time against `now`
pub fn when(start_time: &DateTime<Utc>, now: &DateTime<Utc>) -> When {
    if start_time < now {
        When::Past
    } else {
        When::Upcoming
    }
}

pub fn is_upcoming(start_time: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    when(start_time, now) == When::Upcoming
}

/// Number of start times on the upcoming side
pub fn count_upcoming<'a, I>(start_times: I, now: &DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = &'a DateTime<Utc>>,
{
    start_times
        .into_iter()
        .filter(|t| is_upcoming(t, now))
        .count()
}

/// Partition `shows` into past and upcoming lists, each ordered by start time
///
/// Fails with [`Error::MissingReference`] naming `counterpart_kind` when a
/// show's counterpart row is absent.
pub fn classify(
    shows: Vec<ScheduledShow>,
    counterpart_kind: EntityKind,
    now: &DateTime<Utc>,
) -> Result<Schedule> {
    let mut schedule = Schedule::default();

    for show in shows {
        let counterpart = show
            .counterpart
            .ok_or_else(|| Error::missing(counterpart_kind, show.counterpart_id))?;

        let entry = ShowEntry {
            show_id: show.show_id,
            counterpart_id: show.counterpart_id,
            counterpart_name: counterpart.name,
            counterpart_image_link: counterpart.image_link,
            start_time_display: time::format_medium(&show.start_time),
            start_time: show.start_time,
        };

        match when(&entry.start_time, now) {
            When::Past => schedule.past.push(entry),
            When::Upcoming => schedule.upcoming.push(entry),
        }
    }

    schedule
        .past
        .sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.show_id.cmp(&b.show_id)));
    schedule
        .upcoming
        .sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.show_id.cmp(&b.show_id)));

    Ok(schedule)
}
