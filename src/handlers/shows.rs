use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};

use super::{form_data, redirect_with_notice, rejected_form, NoticeQuery};
use crate::{
    db::repositories::ShowRepository,
    error::Result,
    forms::{FormData, FormErrors, ShowForm},
    services::{listings, Draft},
    state::AppState,
    templates::{show_form_page, shows_page, FormPage},
};

const FORM_TITLE: &str = "List a new show";
const FORM_ACTION: &str = "/shows/create";

pub async fn list_shows(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let shows = listings::show_listing(&state.db).await?;
    Ok(Html(shows_page(&shows, query.notice.as_deref()).into_string()))
}

pub async fn create_show_form(State(state): State<AppState>) -> Result<Html<String>> {
    let choices = ShowRepository::new(state.db.clone()).choices().await?;
    let form = FormData::new();
    let errors = FormErrors::new();
    let page = FormPage {
        title: FORM_TITLE,
        action: FORM_ACTION,
        form: &form,
        errors: &errors,
        banner: None,
    };
    Ok(Html(show_form_page(&page, &choices).into_string()))
}

pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let repo = ShowRepository::new(state.db.clone());
    let choices = repo.choices().await?;
    let draft = Draft::new(form_data(pairs));

    let result = match draft.validate::<ShowForm>(&choices) {
        Ok(validated) => validated.persist(|input| async move { repo.create(input).await }).await,
        Err(rejection) => Err(rejection),
    };

    Ok(match result {
        Ok(_) => redirect_with_notice("/shows", "Show was successfully listed!").into_response(),
        Err(rejection) => rejected_form(&rejection, "Show", |banner| {
            let page = FormPage {
                title: FORM_TITLE,
                action: FORM_ACTION,
                form: &rejection.data,
                errors: &rejection.errors,
                banner: Some(banner),
            };
            show_form_page(&page, &choices)
        }),
    })
}
