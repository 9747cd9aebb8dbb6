use axum::{extract::Query, response::Html};

use super::NoticeQuery;
use crate::templates::home_page;

pub async fn index(Query(query): Query<NoticeQuery>) -> Html<String> {
    Html(home_page(query.notice.as_deref()).into_string())
}
