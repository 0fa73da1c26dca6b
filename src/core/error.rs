use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Errore applicativo con codice macchina stabile.
///
/// Il client distingue i casi tramite `code` (mai tramite string-matching
/// sul messaggio): in particolare la scadenza globale risponde 403 con
/// codice `DEADLINE_PASSED`.
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    details: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, code: &'static str, message: &'static str) -> Self {
        Self {
            status,
            code,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    // Common error constructors
    pub fn invalid_input(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_INPUT", message)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn unauthorized(message: &'static str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: &'static str) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn conflict(message: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    pub fn internal_server_error(message: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", message)
    }

    pub fn service_unavailable(message: &'static str) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", message)
    }

    // Domain error constructors
    pub fn deadline_passed(message: &'static str) -> Self {
        Self::new(StatusCode::FORBIDDEN, "DEADLINE_PASSED", message)
    }

    pub fn already_in_group(message: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, "ALREADY_IN_GROUP", message)
    }

    pub fn duplicate_invitation(message: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, "DUPLICATE_INVITATION", message)
    }

    pub fn insufficient_acceptances(message: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, "INSUFFICIENT_ACCEPTANCES", message)
    }

    pub fn already_finalized(message: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, "ALREADY_FINALIZED", message)
    }

    pub fn already_responded(message: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, "ALREADY_RESPONDED", message)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Resource not found"),

            sqlx::Error::Database(_) => Self::conflict("Database constraint violated"),

            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::service_unavailable("Database unavailable")
            }

            _ => Self::internal_server_error("Internal server error"),
        }
    }
}

impl From<axum::Error> for AppError {
    fn from(err: axum::Error) -> Self {
        Self::internal_server_error("Internal server error").with_details(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::invalid_input("Validation error").with_details(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            error: self.message,
            code: self.code,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_passed_maps_to_403_with_stable_code() {
        let err = AppError::deadline_passed("Group formation is disabled");
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "DEADLINE_PASSED");
    }

    #[test]
    fn domain_conflicts_map_to_409() {
        for (err, code) in [
            (AppError::already_in_group("x"), "ALREADY_IN_GROUP"),
            (AppError::duplicate_invitation("x"), "DUPLICATE_INVITATION"),
            (
                AppError::insufficient_acceptances("x"),
                "INSUFFICIENT_ACCEPTANCES",
            ),
            (AppError::already_finalized("x"), "ALREADY_FINALIZED"),
            (AppError::already_responded("x"), "ALREADY_RESPONDED"),
        ] {
            assert_eq!(err.status(), StatusCode::CONFLICT);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
