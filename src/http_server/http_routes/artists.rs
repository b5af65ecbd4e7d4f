use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use chrono::Utc;

use super::{RecordId, SearchForm};
use crate::forms::FieldErrors;
use crate::forms::artist::ArtistForm;
use crate::http_server::{error::Report, flash::Flash, pages, state::AppState};
use crate::services::{StoreError, artist::ArtistService};

pub async fn list(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), Report> {
    let artists = ArtistService::new(app_state.db.clone()).list().await?;

    let (jar, flash) = Flash::take(jar);
    Ok((jar, Html(pages::artists::list(&artists, flash.as_ref()))))
}

pub async fn search(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, Report> {
    let results = ArtistService::new(app_state.db.clone())
        .search(&form.search_term, Utc::now())
        .await?;

    Ok(Html(pages::search::results(
        pages::search::SearchKind::Artists,
        &results,
        &form.search_term,
    )))
}

pub async fn detail(
    State(app_state): State<Arc<AppState>>,
    RecordId(artist_id): RecordId,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), Report> {
    let detail = ArtistService::new(app_state.db.clone())
        .detail(artist_id, Utc::now())
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Artist",
            id: artist_id,
        })?;

    let (jar, flash) = Flash::take(jar);
    Ok((jar, Html(pages::artists::detail(&detail, flash.as_ref()))))
}

pub async fn create_form() -> Html<String> {
    Html(pages::forms::new_artist(
        &ArtistForm::default(),
        &FieldErrors::default(),
    ))
}

pub async fn create(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> Response {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return (
                StatusCode::BAD_REQUEST,
                Html(pages::forms::new_artist(&form, &errors)),
            )
                .into_response();
        }
    };

    let flash = match ArtistService::new(app_state.db.clone()).create(input).await {
        Ok(artist) => Flash::success(format!("Artist {} was successfully added!", artist.name)),
        Err(e) => {
            tracing::error!("Failed to create artist '{}': {:?}", form.name, e);
            Flash::error(format!(
                "Error occurred while adding Artist {}",
                form.name.trim()
            ))
        }
    };

    (flash.set(jar), Redirect::to("/")).into_response()
}

pub async fn edit_form(
    State(app_state): State<Arc<AppState>>,
    RecordId(artist_id): RecordId,
) -> Result<Html<String>, Report> {
    let artist = ArtistService::new(app_state.db.clone())
        .get(artist_id)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Artist",
            id: artist_id,
        })?;

    Ok(Html(pages::forms::edit_artist(
        artist_id,
        &ArtistForm::from(&artist),
        &FieldErrors::default(),
    )))
}

pub async fn edit(
    State(app_state): State<Arc<AppState>>,
    RecordId(artist_id): RecordId,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> Result<Response, Report> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Html(pages::forms::edit_artist(artist_id, &form, &errors)),
            )
                .into_response());
        }
    };

    let flash = match ArtistService::new(app_state.db.clone())
        .update(artist_id, input)
        .await
    {
        Ok(_) => Flash::success("Artist was successfully updated"),
        Err(e) if e.is_not_found() => return Err(e.into()),
        Err(e) => {
            tracing::error!("Failed to update artist {}: {:?}", artist_id, e);
            Flash::error("Error occurred while updating Artist")
        }
    };

    Ok((flash.set(jar), Redirect::to(&format!("/artists/{artist_id}"))).into_response())
}
