//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use airserv_domain::error::{AirservError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`AirservError`] to an HTTP response with appropriate status code.
pub struct ApiError(AirservError);

impl From<AirservError> for ApiError {
    fn from(err: AirservError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AirservError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AirservError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            AirservError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AirservError::StaleStatus { service_id, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "equipment change was saved but the status of service {service_id} could not be refreshed"
                ),
            ),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airserv_domain::error::NotFoundError;
    use airserv_domain::id::ServiceId;

    fn status_of(err: AirservError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn should_map_errors_to_status_codes() {
        assert_eq!(
            status_of(ValidationError::EmptyName.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                NotFoundError {
                    entity: "Service",
                    id: "x".to_string(),
                }
                .into()
            ),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AirservError::Storage("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AirservError::StaleStatus {
                service_id: ServiceId::new(),
                source: Box::new(AirservError::Storage("locked".into())),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
