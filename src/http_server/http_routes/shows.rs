use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use chrono::Utc;

use crate::forms::FieldErrors;
use crate::forms::show::ShowForm;
use crate::http_server::{error::Report, flash::Flash, pages, state::AppState};
use crate::services::show::ShowService;

pub async fn list(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), Report> {
    let shows = ShowService::new(app_state.db.clone()).list_all().await?;

    let (jar, flash) = Flash::take(jar);
    Ok((jar, Html(pages::shows::list(&shows, flash.as_ref()))))
}

pub async fn create_form() -> Html<String> {
    Html(pages::forms::new_show(
        &ShowForm::starting_at(Utc::now()),
        &FieldErrors::default(),
    ))
}

pub async fn create(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ShowForm>,
) -> Response {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return (
                StatusCode::BAD_REQUEST,
                Html(pages::forms::new_show(&form, &errors)),
            )
                .into_response();
        }
    };

    // A dangling venue or artist id surfaces here as a foreign key failure
    let flash = match ShowService::new(app_state.db.clone()).create(input).await {
        Ok(_) => Flash::success("Show was successfully added"),
        Err(e) => {
            tracing::error!("Failed to create show: {:?}", e);
            Flash::error("Error occurred while adding show")
        }
    };

    (flash.set(jar), Redirect::to("/")).into_response()
}
