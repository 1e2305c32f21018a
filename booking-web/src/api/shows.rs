//! Show pages: global listing and create

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use booking_common::db::shows;
use booking_common::mutation::{self, Mutation};
use booking_common::time;
use booking_common::validation::{show_form, show_input, ValidationErrors};
use tracing::error;

use super::home::home_with;
use super::{form_data, unprocessable, RawForm};
use crate::error::ApiResult;
use crate::render::{self, Notice};
use crate::AppState;

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let listing = shows::list_shows(&state.db).await?;
    Ok(Html(render::pages::show_list(&listing)))
}

/// GET /shows/create
pub async fn create_show_form() -> Html<String> {
    Html(render::forms::new_show(
        &show_form(time::now()),
        &ValidationErrors::default(),
    ))
}

/// POST /shows/create
///
/// An unknown artist or venue id fails at commit and is reported as a
/// generic failure notice.
pub async fn create_show_submission(State(state): State<AppState>, form: RawForm) -> Response {
    let form = form_data(form);
    let input = match show_input(&form) {
        Ok(input) => input,
        Err(errors) => return unprocessable(render::forms::new_show(&form, &errors)).into_response(),
    };

    let page = match mutation::execute(&state.db, Mutation::CreateShow(input)).await {
        Ok(_) => home_with(Notice::success("Show was successfully listed!")),
        Err(e) => {
            error!(error = %e, "Could not create show");
            home_with(Notice::error("An error occurred. Show could not be listed."))
        }
    };
    page.into_response()
}

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show_submission))
}
