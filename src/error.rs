use crate::models::ApiResponse;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Errors a request can end with. Each one renders as a JSON `ApiResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Prediction failed: {0}")]
    Inference(String),

    #[error("Blocking task failed: {0}")]
    Blocking(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(_) | ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(&self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        let err = ApiError::InvalidQuery("powerPS".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid query: powerPS");
    }

    #[test]
    fn server_errors_map_to_500() {
        assert_eq!(
            ApiError::Inference("shape".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Blocking("canceled".into()).error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
