//! Artist pages: listing, search, detail, create and edit

use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use booking_common::db::artists;
use booking_common::mutation::{self, Mutation};
use booking_common::schedule::classify;
use booking_common::search::search;
use booking_common::validation::{artist_form, artist_input, FormData, ValidationErrors};
use booking_common::{time, EntityKind};
use tracing::error;

use super::home::home_with;
use super::{form_data, parse_id, unprocessable, NoticeQuery, RawForm, SearchForm};
use crate::error::{ApiError, ApiResult};
use crate::render::{self, Notice};
use crate::AppState;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let artists = artists::list_artists(&state.db).await?;
    Ok(Html(render::pages::artist_list(&artists)))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> ApiResult<Html<String>> {
    let summaries = artists::artist_summaries(&state.db, &time::now()).await?;
    let results = search(summaries, &form.search_term);
    Ok(Html(render::pages::search_results(
        EntityKind::Artist,
        &form.search_term,
        &results,
    )))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> ApiResult<Html<String>> {
    let id = parse_id(&raw_id)?;
    let artist = artists::get_artist(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(EntityKind::Artist, id))?;

    let rows = artists::shows_for_artist(&state.db, id).await?;
    let schedule = classify(rows, EntityKind::Venue, &time::now())?;

    let notice = match query.notice.as_deref() {
        Some(NoticeQuery::UPDATED) => Some(Notice::success("Successfully Updated!")),
        Some(NoticeQuery::UPDATE_FAILED) => Some(Notice::error(
            "Oops! Something went wrong, the update was unsuccessful!",
        )),
        _ => None,
    };

    Ok(Html(render::pages::artist_detail(&artist, &schedule, notice.as_ref())))
}

/// GET /artists/create
pub async fn create_artist_form() -> Html<String> {
    Html(render::forms::new_artist(
        &FormData::default(),
        &ValidationErrors::default(),
    ))
}

/// POST /artists/create
pub async fn create_artist_submission(State(state): State<AppState>, form: RawForm) -> Response {
    let form = form_data(form);
    let input = match artist_input(&form) {
        Ok(input) => input,
        Err(errors) => return unprocessable(render::forms::new_artist(&form, &errors)).into_response(),
    };

    let name = input.name.clone();
    let page = match mutation::execute(&state.db, Mutation::CreateArtist(input)).await {
        Ok(_) => home_with(Notice::success(format!("Artist {} was successfully listed!", name))),
        Err(e) => {
            error!(error = %e, artist = %name, "Could not create artist");
            home_with(Notice::error(format!(
                "An error occurred. Artist {} could not be listed.",
                name
            )))
        }
    };
    page.into_response()
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Html<String>> {
    let id = parse_id(&raw_id)?;
    let artist = artists::get_artist(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(EntityKind::Artist, id))?;

    Ok(Html(render::forms::edit_artist(
        id,
        &artist_form(&artist),
        &ValidationErrors::default(),
    )))
}

/// POST /artists/:id/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    form: RawForm,
) -> ApiResult<Response> {
    let id = parse_id(&raw_id)?;
    let form = form_data(form);
    let input = match artist_input(&form) {
        Ok(input) => input,
        Err(errors) => {
            return Ok(unprocessable(render::forms::edit_artist(id, &form, &errors)).into_response())
        }
    };

    let notice = match mutation::execute(&state.db, Mutation::UpdateArtist { id, input }).await {
        Ok(_) => NoticeQuery::UPDATED,
        Err(e) if e.is_missing_reference() => {
            return Err(ApiError::not_found(EntityKind::Artist, id))
        }
        Err(e) => {
            error!(error = %e, artist_id = id, "Could not update artist");
            NoticeQuery::UPDATE_FAILED
        }
    };

    Ok(Redirect::to(&format!("/artists/{}?notice={}", id, notice)).into_response())
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/:id", get(show_artist))
        .route(
            "/artists/:id/edit",
            get(edit_artist_form).post(edit_artist_submission),
        )
}
