use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::db::StoreError;
use crate::html;

/// Failures that end a request with a 500 page. Expected outcomes
/// (validation, bad credentials, missing session) never go through here.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let body = html::page(
            "Error",
            "<h1>Something went wrong</h1><p>Please try again later.</p><p><a href=\"/\">Home</a></p>",
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}
