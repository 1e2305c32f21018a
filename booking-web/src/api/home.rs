//! Landing page, stylesheet and not-found fallback

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::render::{self, Notice};

/// GET /
pub async fn home() -> Html<String> {
    Html(render::pages::home(None))
}

/// Landing page carrying the outcome of a create or delete
pub fn home_with(notice: Notice) -> Html<String> {
    Html(render::pages::home(Some(&notice)))
}

/// GET /static/booking.css
pub async fn serve_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        render::STYLESHEET,
    )
        .into_response()
}

/// Fallback for unmatched routes
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render::errors::not_found()))
}
