//! Venue pages: listing, search, detail, create, edit and delete

use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use booking_common::aggregate::group_by_area;
use booking_common::db::venues;
use booking_common::mutation::{self, Mutation};
use booking_common::schedule::classify;
use booking_common::search::search;
use booking_common::validation::{venue_form, venue_input, FormData, ValidationErrors};
use booking_common::{time, EntityKind};
use tracing::error;

use super::home::home_with;
use super::{form_data, parse_id, unprocessable, NoticeQuery, RawForm, SearchForm};
use crate::error::{ApiError, ApiResult};
use crate::render::{self, Notice};
use crate::AppState;

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let summaries = venues::venue_summaries(&state.db, &time::now()).await?;
    let areas = group_by_area(summaries);
    Ok(Html(render::pages::venue_list(&areas)))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> ApiResult<Html<String>> {
    let summaries = venues::venue_summaries(&state.db, &time::now()).await?;
    let results = search(summaries, &form.search_term);
    Ok(Html(render::pages::search_results(
        EntityKind::Venue,
        &form.search_term,
        &results,
    )))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> ApiResult<Html<String>> {
    let id = parse_id(&raw_id)?;
    let venue = venues::get_venue(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(EntityKind::Venue, id))?;

    let rows = venues::shows_for_venue(&state.db, id).await?;
    let schedule = classify(rows, EntityKind::Artist, &time::now())?;

    let notice = match query.notice.as_deref() {
        Some(NoticeQuery::UPDATED) => Some(Notice::success("Venue Updated successfully")),
        Some(NoticeQuery::UPDATE_FAILED) => Some(Notice::error("The update was unsuccessful!")),
        _ => None,
    };

    Ok(Html(render::pages::venue_detail(&venue, &schedule, notice.as_ref())))
}

/// GET /venues/create
pub async fn create_venue_form() -> Html<String> {
    Html(render::forms::new_venue(
        &FormData::default(),
        &ValidationErrors::default(),
    ))
}

/// POST /venues/create
pub async fn create_venue_submission(State(state): State<AppState>, form: RawForm) -> Response {
    let form = form_data(form);
    let input = match venue_input(&form) {
        Ok(input) => input,
        Err(errors) => return unprocessable(render::forms::new_venue(&form, &errors)).into_response(),
    };

    let name = input.name.clone();
    let page = match mutation::execute(&state.db, Mutation::CreateVenue(input)).await {
        Ok(_) => home_with(Notice::success(format!("Successfully listed {}", name))),
        Err(e) => {
            error!(error = %e, venue = %name, "Could not create venue");
            home_with(Notice::error(format!("An error occurred. Could not add {}", name)))
        }
    };
    page.into_response()
}

/// DELETE or POST /venues/:id/delete
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Html<String>> {
    let id = parse_id(&raw_id)?;
    match mutation::execute(&state.db, Mutation::DeleteVenue(id)).await {
        Ok(_) => Ok(home_with(Notice::success("Venue deleted successfully"))),
        Err(e) if e.is_missing_reference() => Err(ApiError::not_found(EntityKind::Venue, id)),
        Err(e) => {
            error!(error = %e, venue_id = id, "Could not delete venue");
            Ok(home_with(Notice::error("An error occurred. Venue could not be deleted.")))
        }
    }
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Html<String>> {
    let id = parse_id(&raw_id)?;
    let venue = venues::get_venue(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(EntityKind::Venue, id))?;

    Ok(Html(render::forms::edit_venue(
        id,
        &venue_form(&venue),
        &ValidationErrors::default(),
    )))
}

/// POST /venues/:id/edit
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    form: RawForm,
) -> ApiResult<Response> {
    let id = parse_id(&raw_id)?;
    let form = form_data(form);
    let input = match venue_input(&form) {
        Ok(input) => input,
        Err(errors) => {
            return Ok(unprocessable(render::forms::edit_venue(id, &form, &errors)).into_response())
        }
    };

    let notice = match mutation::execute(&state.db, Mutation::UpdateVenue { id, input }).await {
        Ok(_) => NoticeQuery::UPDATED,
        Err(e) if e.is_missing_reference() => return Err(ApiError::not_found(EntityKind::Venue, id)),
        Err(e) => {
            error!(error = %e, venue_id = id, "Could not update venue");
            NoticeQuery::UPDATE_FAILED
        }
    };

    Ok(Redirect::to(&format!("/venues/{}?notice={}", id, notice)).into_response())
}

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/:id", get(show_venue))
        .route("/venues/:id/edit", get(edit_venue_form).post(edit_venue_submission))
        .route("/venues/:id/delete", post(delete_venue).delete(delete_venue))
}
