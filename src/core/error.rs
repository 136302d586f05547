use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// User-visible messages for re-rendering a form. Database and internal
    /// failures are logged in full but shown as a generic line.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(errors) => errors.clone(),
            AppError::UnsupportedImageType(msg) | AppError::Conflict(msg) => vec![msg.clone()],
            AppError::NotFound(msg) => vec![msg.clone()],
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                vec!["The record could not be saved. Please try again.".to_string()]
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                vec!["Something went wrong. Please try again.".to_string()]
            }
        }
    }

    /// True when the error should send the user back to the originating form
    /// instead of an error page.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(self, AppError::NotFound(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred".to_string(),
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(ref errors) => (StatusCode::BAD_REQUEST, errors.join("; ")),
            AppError::UnsupportedImageType(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        // Server-rendered app: errors that escape the handlers become a
        // minimal HTML page rather than a JSON body.
        let body = Html(format!(
            "<!doctype html><html><head><title>{status}</title></head>\
             <body><h1>{status}</h1><p>{message}</p>\
             <p><a href=\"/vehicles\">Back to vehicles</a></p></body></html>",
            status = status,
            message = message,
        ));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Map a sqlx error to Conflict when it is a unique-constraint violation,
/// keeping everything else as a plain database error.
pub fn map_unique_violation(e: sqlx::Error, conflict_message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(conflict_message.to_string())
        }
        _ => AppError::Database(e),
    }
}
