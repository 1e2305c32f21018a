//! Case-insensitive substring search over venue and artist names

use serde::Serialize;

use crate::db::models::{ArtistSummary, VenueSummary};

/// Rows that can be searched by name
pub trait Named {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn num_upcoming_shows(&self) -> usize;
}

impl Named for VenueSummary {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn num_upcoming_shows(&self) -> usize {
        self.num_upcoming_shows
    }
}

impl Named for ArtistSummary {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn num_upcoming_shows(&self) -> usize {
        self.num_upcoming_shows
    }
}

/// Matches for one query, ordered by id ascending
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

/// True when `query` occurs in `name`, ignoring case
///
/// An empty query matches every name.
pub fn name_matches(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Filter `rows` by name; the query is trimmed first
pub fn search<T: Named>(rows: Vec<T>, query: &str) -> SearchResults<T> {
    let query = query.trim();
    let mut data: Vec<T> = rows
        .into_iter()
        .filter(|row| name_matches(row.name(), query))
        .collect();
    data.sort_by_key(|row| row.id());

    SearchResults {
        count: data.len(),
        data,
    }
}
