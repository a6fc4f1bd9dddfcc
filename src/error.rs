use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Database error")]
    Db(#[from] sqlx::Error),

    #[error("Session error")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Multipart error")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Session(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        // Don't expose internal error details to clients.
        let message = match &self {
            AppError::NotFound => "Not Found".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Multipart(_) => "Malformed form submission".to_string(),
            _ => "Internal Server Error".to_string(),
        };

        (status, message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        fn status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(status(AppError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status(AppError::BadRequest("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AppError::Internal(anyhow::anyhow!("boom"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
