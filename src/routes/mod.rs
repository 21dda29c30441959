//! HTTP handlers of the board API.

use actix_web::HttpResponse;

use crate::services::ServiceError;

pub mod api;

/// Maps a service failure to the response sent to the client. Internal
/// details are logged, never returned.
pub fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Forbidden().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(serde_json::json!({ "error": message }))
        }
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
        }
        ServiceError::Internal => {
            log::error!("Failed to {action}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        assert_eq!(
            error_response(ServiceError::Unauthorized, "test").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            error_response(ServiceError::NotFound, "test").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(ServiceError::Form("bad".into()), "test").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(ServiceError::Internal, "test").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
