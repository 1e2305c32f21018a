//! HTTP handlers for booking-web

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::{extract::Form, http::StatusCode, response::Html};
use booking_common::validation::FormData;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

pub use artists::artist_routes;
pub use health::health_routes;
pub use home::{home, not_found, serve_css};
pub use shows::show_routes;
pub use venues::venue_routes;

/// Raw form submission; multi-selects repeat their key
pub type RawForm = Form<Vec<(String, String)>>;

/// Body of the venue and artist search forms
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// `?notice=` flag carried by the redirect after an edit
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    pub const UPDATED: &'static str = "updated";
    pub const UPDATE_FAILED: &'static str = "update-failed";
}

/// A form page rendered with field errors
pub fn unprocessable(page: String) -> (StatusCode, Html<String>) {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(page))
}

fn form_data(Form(pairs): RawForm) -> FormData {
    FormData::from(pairs)
}

/// Parse an `:id` path segment; a segment that is not an id names nothing
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse()
        .map_err(|_| ApiError::UnknownPath(raw.to_string()))
}
