pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::forms::FormData;
use crate::services::{Rejection, RejectionCause};
use crate::state::AppState;

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))

        // Venues
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route("/venues/create", get(venues::create_venue_form).post(venues::create_venue_submission))
        .route("/venues/:id", get(venues::show_venue).delete(venues::delete_venue))
        .route("/venues/:id/edit", get(venues::edit_venue_form).post(venues::edit_venue_submission))
        .route("/venues/:id/delete", post(venues::delete_venue))

        // Artists
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route("/artists/create", get(artists::create_artist_form).post(artists::create_artist_submission))
        .route("/artists/:id", get(artists::show_artist))
        .route("/artists/:id/edit", get(artists::edit_artist_form).post(artists::edit_artist_submission))

        // Shows
        .route("/shows", get(shows::list_shows))
        .route("/shows/create", get(shows::create_show_form).post(shows::create_show_submission))
}

/// One-shot message carried across a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Repeated keys (select-multiple) arrive as separate pairs.
pub(crate) fn form_data(pairs: Vec<(String, String)>) -> FormData {
    FormData::from_pairs(pairs)
}

/// 303 to `location` with `notice` shown once on the target page.
pub(crate) fn redirect_with_notice(location: &str, notice: &str) -> Redirect {
    Redirect::to(&format!("{}?notice={}", location, urlencoding::encode(notice)))
}

/// Re-render a rejected form. Invalid input is a 422, a failed write a 500.
pub(crate) fn rejected_form<R>(rejection: &Rejection, what: &str, render: R) -> Response
where
    R: FnOnce(&str) -> Markup,
{
    let (status, banner) = match &rejection.cause {
        RejectionCause::Invalid => (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{} could not be saved. Please correct the errors below.", what),
        ),
        RejectionCause::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("An error occurred. {} could not be listed.", what),
        ),
    };

    (status, Html(render(&banner).into_string())).into_response()
}
