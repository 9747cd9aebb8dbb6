use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::Utc;
use maud::Markup;

use super::{form_data, redirect_with_notice, rejected_form, NoticeQuery, SearchForm};
use crate::{
    db::repositories::ArtistRepository,
    error::Result,
    forms::{artist::form_data_from, ArtistForm, FormData, FormErrors},
    services::{listings, Draft},
    state::AppState,
    templates::{artist_detail_page, artist_form_page, artists_page, search_results_page, FormPage},
};

pub async fn list_artists(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let artists = ArtistRepository::new(state.db.clone()).list().await?;
    Ok(Html(artists_page(&artists, query.notice.as_deref()).into_string()))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> Result<Html<String>> {
    let results = listings::search_artists(&state.db, &search.search_term, Utc::now().into()).await?;
    Ok(Html(
        search_results_page("Artists", "/artists", &search.search_term, &results).into_string(),
    ))
}

pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let detail = listings::artist_detail(&state.db, id, Utc::now().into()).await?;
    Ok(Html(artist_detail_page(&detail, query.notice.as_deref()).into_string()))
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
    artist_form_page(&page, &state.catalog)
}

pub async fn create_artist_form(State(state): State<AppState>) -> Html<String> {
    Html(render_form(
        &state,
        "List a new artist",
        "/artists/create",
        &FormData::new(),
        &FormErrors::new(),
        None,
    )
    .into_string())
}

pub async fn create_artist_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let draft = Draft::new(form_data(pairs));
    let name = draft.data().text("name").to_string();
    let repo = ArtistRepository::new(state.db.clone());

    let result = match draft.validate::<ArtistForm>(&state.catalog) {
        Ok(validated) => validated.persist(|input| async move { repo.create(input).await }).await,
        Err(rejection) => Err(rejection),
    };

    match result {
        Ok(_) => redirect_with_notice("/artists", &format!("Artist {} was successfully listed!", name))
            .into_response(),
        Err(rejection) => rejected_form(&rejection, &format!("Artist {}", name), |banner| {
            render_form(
                &state,
                "List a new artist",
                "/artists/create",
                &rejection.data,
                &rejection.errors,
                Some(banner),
            )
        }),
    }
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>> {
    let artist = ArtistRepository::new(state.db.clone()).get(id).await?;
    let action = format!("/artists/{}/edit", id);
    Ok(Html(render_form(
        &state,
        "Edit artist",
        &action,
        &form_data_from(&artist),
        &FormErrors::new(),
        None,
    )
    .into_string()))
}

pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let repo = ArtistRepository::new(state.db.clone());
    repo.get(id).await?;

    let draft = Draft::new(form_data(pairs));
    let name = draft.data().text("name").to_string();

    let result = match draft.validate::<ArtistForm>(&state.catalog) {
        Ok(validated) => validated.persist(|input| async move { repo.update(id, input).await }).await,
        Err(rejection) => Err(rejection),
    };

    let location = format!("/artists/{}", id);
    Ok(match result {
        Ok(_) => redirect_with_notice(&location, &format!("Artist {} was successfully updated!", name))
            .into_response(),
        Err(rejection) => {
            let action = format!("{}/edit", location);
            rejected_form(&rejection, &format!("Artist {}", name), |banner| {
                render_form(
                    &state,
                    "Edit artist",
                    &action,
                    &rejection.data,
                    &rejection.errors,
                    Some(banner),
                )
            })
        }
    })
}
