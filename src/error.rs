use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::grouping::GroupingError;
use crate::templates::error_page;

#[derive(Error, Debug)]
pub enum AppError {
    /// Any read or write failure from the storage layer.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Grouping error: {0}")]
    Grouping(#[from] GroupingError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        Self::NotFound(format!("{} not found", what))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error occurred")
            }
            Self::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            Self::Grouping(ref e) => {
                tracing::error!("Grouping error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Data processing error")
            }
            Self::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.as_str())
            }
            Self::Other(ref e) => {
                tracing::error!("Unexpected error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred")
            }
        };

        (status, Html(error_page(status, message).into_string())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
