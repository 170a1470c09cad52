use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use database::{
    database::request_manager::RequestManagerError, model::validation::ValidationErrors,
};
use serde::Serialize;
use thiserror::Error;

/// Every failure a handler can answer with. The display string is what the client sees.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Reports the first broken rule of the person schema
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Person not found")]
    PersonNotFound,

    #[error("Endpoint not found")]
    EndpointNotFound,

    /// The detail is only ever logged
    #[error("Internal server error")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl From<RequestManagerError> for ApiError {
    fn from(err: RequestManagerError) -> Self {
        match err {
            RequestManagerError::Apply(apply_error) if apply_error.is_not_found() => {
                ApiError::PersonNotFound
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Extractor failures, e.g. a body over the size limit
impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        ApiError::Internal(format!("Unreadable request body: {}", err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("Unreadable request body: {}", err))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PersonNotFound | ApiError::EndpointNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            log::error!("Request failed: {}", detail);
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
