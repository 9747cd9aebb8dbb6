use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use maud::Markup;

use super::{form_data, redirect_with_notice, rejected_form, NoticeQuery, SearchForm};
use crate::{
    db::repositories::VenueRepository,
    error::Result,
    forms::{venue::form_data_from, FormData, FormErrors, VenueForm},
    services::{listings, Draft},
    state::AppState,
    templates::{search_results_page, venue_detail_page, venue_form_page, venues_page, FormPage},
};

pub async fn list_venues(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let areas = listings::venue_areas(&state.db, Utc::now().into()).await?;
    Ok(Html(venues_page(&areas, query.notice.as_deref()).into_string()))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> Result<Html<String>> {
    let results = listings::search_venues(&state.db, &search.search_term, Utc::now().into()).await?;
    Ok(Html(
        search_results_page("Venues", "/venues", &search.search_term, &results).into_string(),
    ))
}

pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let detail = listings::venue_detail(&state.db, id, Utc::now().into()).await?;
    Ok(Html(venue_detail_page(&detail, query.notice.as_deref()).into_string()))
}

fn render_form(
    state: &AppState,
    title: &str,
    action: &str,
    form: &FormData,
    errors: &FormErrors,
    banner: Option<&str>,
) -> Markup {
    let page = FormPage {
        title,
        action,
        form,
        errors,
        banner,
    };
    venue_form_page(&page, &state.catalog)
}

pub async fn create_venue_form(State(state): State<AppState>) -> Html<String> {
    Html(render_form(
        &state,
        "List a new venue",
        "/venues/create",
        &FormData::new(),
        &FormErrors::new(),
        None,
    )
    .into_string())
}

pub async fn create_venue_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let draft = Draft::new(form_data(pairs));
    let name = draft.data().text("name").to_string();
    let repo = VenueRepository::new(state.db.clone());

    let result = match draft.validate::<VenueForm>(&state.catalog) {
        Ok(validated) => validated.persist(|input| async move { repo.create(input).await }).await,
        Err(rejection) => Err(rejection),
    };

    match result {
        Ok(_) => redirect_with_notice("/venues", &format!("Venue {} was successfully listed!", name))
            .into_response(),
        Err(rejection) => rejected_form(&rejection, &format!("Venue {}", name), |banner| {
            render_form(
                &state,
                "List a new venue",
                "/venues/create",
                &rejection.data,
                &rejection.errors,
                Some(banner),
            )
        }),
    }
}

pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>> {
    let venue = VenueRepository::new(state.db.clone()).get(id).await?;
    let action = format!("/venues/{}/edit", id);
    Ok(Html(render_form(
        &state,
        "Edit venue",
        &action,
        &form_data_from(&venue),
        &FormErrors::new(),
        None,
    )
    .into_string()))
}

pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let repo = VenueRepository::new(state.db.clone());
    repo.get(id).await?;

    let draft = Draft::new(form_data(pairs));
    let name = draft.data().text("name").to_string();

    let result = match draft.validate::<VenueForm>(&state.catalog) {
        Ok(validated) => validated.persist(|input| async move { repo.update(id, input).await }).await,
        Err(rejection) => Err(rejection),
    };

    let location = format!("/venues/{}", id);
    Ok(match result {
        Ok(_) => redirect_with_notice(&location, &format!("Venue {} was successfully updated!", name))
            .into_response(),
        Err(rejection) => {
            let action = format!("{}/edit", location);
            rejected_form(&rejection, &format!("Venue {}", name), |banner| {
                render_form(
                    &state,
                    "Edit venue",
                    &action,
                    &rejection.data,
                    &rejection.errors,
                    Some(banner),
                )
            })
        }
    })
}

pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    VenueRepository::new(state.db.clone()).delete(id).await?;
    Ok(redirect_with_notice("/venues", "Venue was successfully deleted!"))
}
