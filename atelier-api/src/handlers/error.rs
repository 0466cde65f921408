use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use atelier_core::ServiceError;
use shared_types::ErrorResponse;

/// Service failure surfaced as a JSON error body
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        ApiError(error)
    }
}

impl ApiError {
    pub fn bad_request(field: &'static str, message: impl Into<String>) -> Self {
        ApiError(ServiceError::validation(field, message))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Remote(_) | ServiceError::Decode { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code() == StatusCode::BAD_GATEWAY {
            tracing::error!("Record store failure: {}", self.0);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.0.to_string(),
        })
    }
}
