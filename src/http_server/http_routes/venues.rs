use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use chrono::Utc;
use serde_json::json;

use super::{RecordId, SearchForm};
use crate::forms::FieldErrors;
use crate::forms::venue::VenueForm;
use crate::http_server::{error::Report, flash::Flash, pages, state::AppState};
use crate::services::{StoreError, venue::VenueService};

pub async fn list(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), Report> {
    let areas = VenueService::new(app_state.db.clone())
        .list_by_location(Utc::now())
        .await?;

    let (jar, flash) = Flash::take(jar);
    Ok((jar, Html(pages::venues::list(&areas, flash.as_ref()))))
}

pub async fn search(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, Report> {
    let results = VenueService::new(app_state.db.clone())
        .search(&form.search_term, Utc::now())
        .await?;

    Ok(Html(pages::search::results(
        pages::search::SearchKind::Venues,
        &results,
        &form.search_term,
    )))
}

pub async fn detail(
    State(app_state): State<Arc<AppState>>,
    RecordId(venue_id): RecordId,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), Report> {
    let detail = VenueService::new(app_state.db.clone())
        .detail(venue_id, Utc::now())
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Venue",
            id: venue_id,
        })?;

    let (jar, flash) = Flash::take(jar);
    Ok((jar, Html(pages::venues::detail(&detail, flash.as_ref()))))
}

pub async fn create_form() -> Html<String> {
    Html(pages::forms::new_venue(
        &VenueForm::default(),
        &FieldErrors::default(),
    ))
}

pub async fn create(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> Response {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return (
                StatusCode::BAD_REQUEST,
                Html(pages::forms::new_venue(&form, &errors)),
            )
                .into_response();
        }
    };

    let flash = match VenueService::new(app_state.db.clone()).create(input).await {
        Ok(venue) => Flash::success(format!("Venue {} was successfully listed!", venue.name)),
        Err(e) => {
            tracing::error!("Failed to create venue '{}': {:?}", form.name, e);
            Flash::error(format!("Error occurred while adding {}", form.name.trim()))
        }
    };

    (flash.set(jar), Redirect::to("/")).into_response()
}

pub async fn edit_form(
    State(app_state): State<Arc<AppState>>,
    RecordId(venue_id): RecordId,
) -> Result<Html<String>, Report> {
    let venue = VenueService::new(app_state.db.clone())
        .get(venue_id)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Venue",
            id: venue_id,
        })?;

    Ok(Html(pages::forms::edit_venue(
        venue_id,
        &VenueForm::from(&venue),
        &FieldErrors::default(),
    )))
}

pub async fn edit(
    State(app_state): State<Arc<AppState>>,
    RecordId(venue_id): RecordId,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> Result<Response, Report> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Html(pages::forms::edit_venue(venue_id, &form, &errors)),
            )
                .into_response());
        }
    };

    let flash = match VenueService::new(app_state.db.clone())
        .update(venue_id, input)
        .await
    {
        Ok(_) => Flash::success("Venue was successfully updated"),
        Err(e) if e.is_not_found() => return Err(e.into()),
        Err(e) => {
            tracing::error!("Failed to update venue {}: {:?}", venue_id, e);
            Flash::error("Error occurred while updating Venue")
        }
    };

    Ok((flash.set(jar), Redirect::to(&format!("/venues/{venue_id}"))).into_response())
}

/// Called from scripts rather than pages, so it answers with JSON and
/// leaves the flash for whatever page the caller loads next.
pub async fn delete(
    State(app_state): State<Arc<AppState>>,
    RecordId(venue_id): RecordId,
    jar: CookieJar,
) -> Response {
    let (status, flash) = match VenueService::new(app_state.db.clone())
        .delete(venue_id)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Flash::success(format!("Venue {venue_id} was successfully removed!")),
        ),
        Err(e) => {
            let status = if e.is_not_found() {
                StatusCode::NOT_FOUND
            } else {
                tracing::error!("Failed to delete venue {}: {:?}", venue_id, e);
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Flash::error(format!("Error occurred while deleting {venue_id}")),
            )
        }
    };

    let success = status == StatusCode::OK;
    (status, flash.set(jar), Json(json!({ "success": success }))).into_response()
}
