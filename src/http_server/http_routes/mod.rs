pub mod artists;
pub mod home;
pub mod shows;
pub mod venues;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::response::Response;
use serde::Deserialize;

use crate::http_server::error;

/// Body of the venue and artist search forms.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

/// Numeric id from the path. Anything that isn't an id gets the 404 page.
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| error::not_found())?;

        id.parse().map(Self).map_err(|_| {
            tracing::debug!("Rejected non-numeric id {:?}", id);
            error::not_found()
        })
    }
}
