use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure taxonomy for the whole API surface. Every handler returns
/// `ApiResult<HttpResponse>` and lets actix render the error through
/// [`ResponseError`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("not authorized")]
    Forbidden,

    #[error("{0}")]
    InvalidInput(String),

    #[error("validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("internal server error")]
    Internal(#[from] sqlx::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidInput(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // the caller only ever sees the stable message; the store detail
        // goes to the log
        if let Self::Internal(source) = self {
            log::error!("store failure: {source}");
        }

        let mut body = json!({ "error": self.to_string() });
        if let Self::Validation(errors) = self {
            body["details"] = json!(errors);
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}
