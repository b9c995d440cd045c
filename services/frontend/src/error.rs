//! Custom error types for the frontend service

use askama::Template;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views::ErrorTemplate;

/// Failures that prevent a screen from being rendered at all
///
/// Backend errors are not listed here: they are shown on the screen that
/// triggered them.
#[derive(Error, Debug)]
pub enum FrontendError {
    /// The upload form could not be read
    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for FrontendError {
    fn into_response(self) -> Response {
        let status = match &self {
            FrontendError::Multipart(e) => e.status(),
            FrontendError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!("Frontend error: {}", self);

        let message = self.to_string();
        match (ErrorTemplate {
            message: message.clone(),
        })
        .render()
        {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}

/// Type alias for frontend results
pub type FrontendResult<T> = Result<T, FrontendError>;
